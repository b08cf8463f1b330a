use std::sync::OnceLock;

use regex::Regex;

use super::regex;
use crate::models::LinkDefinition;

/// `[^key]: text`
pub struct FootnoteDefinition;

impl FootnoteDefinition {
    pub fn parse(line: &str) -> Option<(&str, &str)> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r"^\[\^([^\]\s]+)\]:\s*(.*?)\s*$").captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// `[label]: target "title"`
pub struct LinkReference;

impl LinkReference {
    pub fn parse(line: &str) -> Option<LinkDefinition> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r#"^\[([^\]\^][^\]]*)\]:\s*<?([^\s>]+)>?(?:\s+"([^"]*)")?\s*$"#)
            .captures(line)?;
        Some(LinkDefinition {
            key: caps.get(1)?.as_str().trim().to_string(),
            target: caps.get(2)?.as_str().to_string(),
            title: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }
}
