//! # Inline Kinds
//!
//! Inline constructs own their delimiters. The matchers call these
//! constants and helpers; they never hardcode `` ` ``, `**` or `[[`.

pub mod code_span;
pub mod delimiter;
pub mod link;

pub use code_span::CodeSpan;
pub use delimiter::{DelimiterRun, Width};
pub use link::{Citation, FootnoteMarker, Link};

/// `\[ … \]` inline math.
pub struct Formula;

impl Formula {
    pub const OPEN: &'static str = r"\[";
    pub const CLOSE: &'static str = r"\]";
}

/// Markers resolved through delimiter runs.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const TILDE: u8 = b'~';
    pub const QUOTE: u8 = b'"';
}

/// `x_1` and `x^2`.
pub struct Script;

impl Script {
    pub const SUB: u8 = b'_';
    pub const SUP: u8 = b'^';
    pub const MAX_BASE: usize = 4;
    pub const MAX_SCRIPT: usize = 5;

    /// Characters that may surround a base/script pair.
    pub fn is_boundary(c: char) -> bool {
        c.is_whitespace()
            || (c.is_ascii_punctuation() && c != Self::SUB as char && c != Self::SUP as char)
    }

    /// Whether `base_script` reads as a subscript rather than an identifier:
    /// the script starts with a digit (`x_1`, `H_2O`) or the base is a single
    /// character (`x_i`).
    pub fn is_subscript(base: &str, script: &str) -> bool {
        script.starts_with(|c: char| c.is_ascii_digit()) || base.len() == 1
    }

    /// Whether the text after a script ends it. A dot followed by a word
    /// character continues a file name (`file_1.txt`); after an alphabetic
    /// subscript `(`, `.` and `,` continue an identifier (`x_i(`).
    pub fn ends_script(marker: u8, script: &str, rest: &str) -> bool {
        let mut chars = rest.chars();
        let Some(next) = chars.next() else {
            return true;
        };
        if !Self::is_boundary(next) {
            return false;
        }
        if next == '.' && chars.next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        let alphabetic = marker == Self::SUB && script.starts_with(|c: char| c.is_ascii_alphabetic());
        !(alphabetic && Self::IDENTIFIER_CONTINUATION.contains(&next))
    }

    const IDENTIFIER_CONTINUATION: [char; 3] = ['(', '.', ','];
}
