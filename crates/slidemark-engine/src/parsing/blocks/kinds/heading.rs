use std::sync::OnceLock;

use regex::Regex;

use super::regex;

/// `# title` opens a chapter.
pub struct ChapterHeading;

impl ChapterHeading {
    pub const PREFIX: &'static str = "# ";

    pub fn parse(line: &str) -> Option<&str> {
        line.strip_prefix(Self::PREFIX).map(str::trim)
    }
}

/// `## title` opens a slide; a trailing `--skip--` hides it.
pub struct SlideHeading;

impl SlideHeading {
    pub const PREFIX: &'static str = "## ";
    pub const SKIP: &'static str = "--skip--";

    /// Returns the title (marker stripped) and the skip flag.
    pub fn parse(line: &str) -> Option<(&str, bool)> {
        let title = line.strip_prefix(Self::PREFIX)?.trim();
        match title.strip_suffix(Self::SKIP) {
            Some(rest) => Some((rest.trim_end(), true)),
            None => Some((title, false)),
        }
    }
}

/// `###` to `#####` headings inside a slide.
pub struct SubHeading;

impl SubHeading {
    /// Returns the level (3 to 5) and the title.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r"^(#{3,5}) (.*)$").captures(line)?;
        let level = caps.get(1)?.as_str().len() as u8;
        Some((level, caps.get(2)?.as_str().trim()))
    }
}
