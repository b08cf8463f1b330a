//! # Document Model
//!
//! Presentation → chapters → slides → elements, plus the inline node tree
//! attached to every text-bearing element once references are resolved.
//!
//! The model has no behaviour beyond storage and traversal. It is appended to
//! by the block parser, gets inline nodes attached by the resolver, and is
//! read-only afterwards.

pub mod element;
pub mod node;
pub mod presentation;
pub mod reference;

pub use element::*;
pub use node::{Node, RichText};
pub use presentation::{Chapter, Metadata, Presentation, Slide, Toc, TocEntry, TocSlide};
pub use reference::{Footnote, LinkDefinition};
