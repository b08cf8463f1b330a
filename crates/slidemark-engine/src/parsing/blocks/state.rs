use std::fmt;

use serde::Serialize;

use crate::models::ListKind;

/// The block the parser is currently inside. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ParserState {
    #[default]
    Normal,
    /// Four-space indented code.
    Code,
    CodeFenced,
    Script,
    Equation,
    Uml,
    Table,
    Quote,
    Important,
    Question,
    Box,
    MatchingQuestion,
    /// Unordered list at level 1 to 3.
    Unordered(u8),
    /// Ordered list at level 1 to 3.
    Ordered(u8),
}

impl ParserState {
    /// States whose lines are stored verbatim until the end marker.
    pub fn is_raw(self) -> bool {
        matches!(
            self,
            ParserState::CodeFenced | ParserState::Script | ParserState::Equation | ParserState::Uml
        )
    }

    pub fn is_list(self) -> bool {
        self.list_level().is_some()
    }

    pub fn list_level(self) -> Option<u8> {
        match self {
            ParserState::Unordered(level) | ParserState::Ordered(level) => Some(level),
            _ => None,
        }
    }

    pub fn list(kind: ListKind, level: u8) -> Self {
        match kind {
            ListKind::Unordered => ParserState::Unordered(level),
            ListKind::Ordered { .. } => ParserState::Ordered(level),
        }
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserState::Normal => f.write_str("NORMAL"),
            ParserState::Code => f.write_str("CODE"),
            ParserState::CodeFenced => f.write_str("CODE_FENCED"),
            ParserState::Script => f.write_str("SCRIPT"),
            ParserState::Equation => f.write_str("EQUATION"),
            ParserState::Uml => f.write_str("UML"),
            ParserState::Table => f.write_str("TABLE"),
            ParserState::Quote => f.write_str("QUOTE"),
            ParserState::Important => f.write_str("IMPORTANT"),
            ParserState::Question => f.write_str("QUESTION"),
            ParserState::Box => f.write_str("BOX"),
            ParserState::MatchingQuestion => f.write_str("MATCHING_QUESTION"),
            ParserState::Unordered(level) => write!(f, "UL{level}"),
            ParserState::Ordered(level) => write!(f, "OL{level}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_states() {
        assert!(ParserState::CodeFenced.is_raw());
        assert!(ParserState::Uml.is_raw());
        assert!(!ParserState::Code.is_raw());
        assert!(!ParserState::Normal.is_raw());
    }

    #[test]
    fn list_states_carry_level() {
        assert_eq!(ParserState::Ordered(2).list_level(), Some(2));
        assert_eq!(ParserState::Table.list_level(), None);
        assert_eq!(
            ParserState::list(ListKind::Ordered { start: 3 }, 3),
            ParserState::Ordered(3)
        );
    }

    #[test]
    fn display_uses_state_names() {
        assert_eq!(ParserState::Unordered(2).to_string(), "UL2");
        assert_eq!(ParserState::CodeFenced.to_string(), "CODE_FENCED");
    }
}
