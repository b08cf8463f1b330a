use std::sync::OnceLock;

use regex::Regex;

use super::regex;

/// One multiple-choice answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<'a> {
    pub correct: bool,
    /// `[ ].` renders the group on a single line.
    pub inline: bool,
    pub text: &'a str,
}

/// `[ ] text`, `[X] text`, optionally bulleted.
pub struct ChoiceLine;

impl ChoiceLine {
    pub fn parse(line: &str) -> Option<Choice<'_>> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r"^\s*(?:[*-]\s+)?\[([ xX])\](\.)?\s+(.*)$").captures(line)?;
        Some(Choice {
            correct: caps.get(1)?.as_str() != " ",
            inline: caps.get(2).is_some(),
            text: caps.get(3)?.as_str().trim_end(),
        })
    }
}

/// `* left -> right` inside a matching question.
pub struct MatchingEntry;

impl MatchingEntry {
    pub fn parse(line: &str) -> Option<(&str, &str)> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r"^\s*\*\s*(.*?)\s*->\s*(.*?)\s*$").captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchecked_and_checked_choices() {
        assert_eq!(
            ChoiceLine::parse("[ ] Berlin"),
            Some(Choice {
                correct: false,
                inline: false,
                text: "Berlin"
            })
        );
        assert_eq!(
            ChoiceLine::parse("* [X] Paris"),
            Some(Choice {
                correct: true,
                inline: false,
                text: "Paris"
            })
        );
        assert_eq!(
            ChoiceLine::parse("- [x]. yes"),
            Some(Choice {
                correct: true,
                inline: true,
                text: "yes"
            })
        );
    }

    #[test]
    fn link_label_is_not_a_choice() {
        assert_eq!(ChoiceLine::parse("[a] text"), None);
        assert_eq!(ChoiceLine::parse("[ ]text"), None);
    }

    #[test]
    fn matching_entries() {
        assert_eq!(MatchingEntry::parse("* Java -> JVM"), Some(("Java", "JVM")));
        assert_eq!(MatchingEntry::parse("*C#->CLR"), Some(("C#", "CLR")));
        assert_eq!(MatchingEntry::parse("* no arrow"), None);
    }
}
