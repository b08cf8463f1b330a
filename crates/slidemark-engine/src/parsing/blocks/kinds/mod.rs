//! # Block Kinds
//!
//! Every dialect construct owns its line syntax here. The classifier and the
//! builder call these types; they never hardcode `##`, `` ``` `` or `|`.
//!
//! All functions are pure: they look at one line and either extract the
//! construct's fragments or return `None`.

pub mod action;
pub mod code_fence;
pub mod directive;
pub mod heading;
pub mod image;
pub mod list;
pub mod quiz;
pub mod quote;
pub mod raw;
pub mod reference;
pub mod table;

use std::sync::OnceLock;

use regex::Regex;

pub use action::{HtmlLine, LineActionLine, Separator, VerticalSpace};
pub use code_fence::{CodeFence, Fence, Include, IncludeSource, IndentedCode};
pub use directive::Directive;
pub use heading::{ChapterHeading, SlideHeading, SubHeading};
pub use image::ImageLine;
pub use list::{ListLine, ListMarker};
pub use quiz::{Choice, ChoiceLine, MatchingEntry};
pub use quote::{QuoteKind, QuoteLine};
pub use raw::{EquationFence, ScriptFence, UmlFence};
pub use reference::{FootnoteDefinition, LinkReference};
pub use table::TableLine;

/// Compiles a line grammar pattern once.
fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid line grammar regex"))
}

/// A line with nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of leading spaces.
pub fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
