use std::sync::OnceLock;

use regex::Regex;

use super::regex;
use crate::models::ListKind;

/// A list item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine<'a> {
    pub kind: ListKind,
    /// 1 to 3.
    pub level: u8,
    pub text: &'a str,
}

/// List bullets: two spaces per level, then `*`/`-` or `N.` and a space.
pub struct ListMarker;

impl ListMarker {
    pub const INDENT_PER_LEVEL: usize = 2;

    pub fn parse(line: &str) -> Option<ListLine<'_>> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r"^((?:  ){1,3})(?:([*-])|(\d+)\.) (.*)$").captures(line)?;
        let level = (caps.get(1)?.as_str().len() / Self::INDENT_PER_LEVEL) as u8;
        let kind = match caps.get(3) {
            Some(number) => ListKind::Ordered {
                start: number.as_str().parse().ok()?,
            },
            None => ListKind::Unordered,
        };
        Some(ListLine {
            kind,
            level,
            text: caps.get(4)?.as_str().trim_end(),
        })
    }

    /// Column of the bullet for a level.
    pub fn bullet_indent(level: u8) -> usize {
        usize::from(level) * Self::INDENT_PER_LEVEL
    }
}
