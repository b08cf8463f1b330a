//! # Inline Parsing
//!
//! Turns the raw content of a text-bearing element into a tree of
//! [`Node`](crate::models::Node)s.
//!
//! ## Architecture
//!
//! Content starts as one `Unparsed` run. Each pass replaces every unparsed
//! run with the text before its leftmost span, the span (whose children are
//! unparsed again) and the text after it. Passes repeat until none fires, so
//! nested spans resolve layer by layer.
//!
//! ## Modules
//!
//! - **`kinds`**: inline constructs with owned delimiters and flanking rules
//! - **`cursor`**: byte [`Cursor`](cursor::Cursor) used by the scanners
//! - **`matchers`**: the fifteen span matchers in priority order
//! - **`parser`**: [`parse_inline`] and the fixed-point driver
//!
//! ## Precedence
//!
//! Every match of a higher-priority matcher protects its range: `` `*x*` ``
//! is a code span, and `*a `*` b*` is one emphasis.

pub mod cursor;
pub mod kinds;
pub mod matchers;
pub mod parser;

use crate::models::Footnote;

pub use parser::{parse_inline, resolve_nodes};

/// What the inline parser may look up while parsing one piece of content.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineContext<'a> {
    /// Footnotes of the slide the content belongs to.
    pub footnotes: &'a [Footnote],
}

impl<'a> InlineContext<'a> {
    pub fn new(footnotes: &'a [Footnote]) -> Self {
        Self { footnotes }
    }

    pub fn footnote(&self, key: &str) -> Option<&'a Footnote> {
        self.footnotes.iter().find(|f| f.key == key)
    }
}
