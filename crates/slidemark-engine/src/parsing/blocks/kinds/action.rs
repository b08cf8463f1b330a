//! Single-line constructs that carry no text of their own.

use std::sync::OnceLock;

use regex::Regex;

use super::regex;
use crate::models::LineAction;

/// `---` toggles speaker notes.
pub struct Separator;

impl Separator {
    pub const MARKER: &'static str = "---";

    pub fn matches(line: &str) -> bool {
        line.trim_end() == Self::MARKER
    }
}

/// `<br>` alone on a line.
pub struct VerticalSpace;

impl VerticalSpace {
    pub fn matches(line: &str) -> bool {
        matches!(line.trim(), "<br>" | "<br/>" | "<br />")
    }
}

/// `((Button))` and friends.
pub struct LineActionLine;

impl LineActionLine {
    pub fn parse(line: &str) -> Option<LineAction> {
        let name = line.trim().strip_prefix("((")?.strip_suffix("))")?;
        let action = match name {
            "Button" => LineAction::Button,
            "Button-With-Log" => LineAction::ButtonWithLog,
            "Button-With-Log-Pre" => LineAction::ButtonWithLogPre,
            "Button-Link-Previous" => LineAction::ButtonLinkPrevious,
            "Live-CSS" => LineAction::LiveCss,
            "Live-Preview" => LineAction::LivePreview,
            "Live-Preview-Float" => LineAction::LivePreviewFloat,
            _ => return None,
        };
        Some(action)
    }
}

/// A line that starts with an HTML open or close tag is passed through.
pub struct HtmlLine;

impl HtmlLine {
    pub fn matches(line: &str) -> bool {
        static RE: OnceLock<Regex> = OnceLock::new();
        regex(&RE, r"^</?[A-Za-z][A-Za-z0-9-]*(?:\s[^>]*)?/?>").is_match(line)
    }
}
