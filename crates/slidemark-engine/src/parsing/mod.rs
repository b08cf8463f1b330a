//! # Parsing
//!
//! Block parsing of chapter files, inline parsing of element content, and
//! the reference resolver that connects the two.

pub mod blocks;
pub mod inline;
pub mod resolve;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::io::ChapterSource;
use crate::models::Presentation;

use blocks::BlockBuilder;

pub const DEFAULT_CODE_LANGUAGE: &str = "java";

/// Per-run options supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Language of code blocks that do not name one.
    pub default_language: String,
    /// Slide numbers reserved before the first slide.
    pub front_matter_pages: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_CODE_LANGUAGE.to_string(),
            front_matter_pages: 0,
        }
    }
}

/// Running counters carried from one chapter file to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    pub chapter: usize,
    pub slide: usize,
}

impl Counters {
    pub fn with_front_matter(pages: usize) -> Self {
        Self {
            chapter: 0,
            slide: pages,
        }
    }
}

/// Parses one chapter file into `presentation`.
///
/// Returns the counters to pass to the next file. On error nothing of this
/// file is added.
pub fn parse_chapter(
    source: &ChapterSource,
    options: &ParseOptions,
    presentation: &mut Presentation,
    counters: Counters,
) -> Result<Counters, ParseError> {
    log::info!("Parsing {} ({} lines)", source.name, source.lines.len());

    let mut builder = BlockBuilder::new(
        source.name.as_str(),
        &source.base_dir,
        options.default_language.as_str(),
        counters,
    );
    for (i, line) in source.lines.iter().enumerate() {
        if let Err(err) = builder.push(line, &source.lines[i + 1..]) {
            log::error!("{err}");
            return Err(err);
        }
    }

    let built = builder.finish();
    log::debug!(
        "{}: {} chapter(s), slides up to {}",
        source.name,
        built.chapters.len(),
        built.counters.slide
    );
    presentation.chapters.extend(built.chapters);
    presentation.comments.extend(built.comments);
    Ok(built.counters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_continue_across_files() {
        let mut presentation = Presentation::default();
        let options = ParseOptions::default();
        let first = ChapterSource::from_text("a.md", "# A\n## One\n## Two");
        let second = ChapterSource::from_text("b.md", "# B\n## Three");

        let counters = Counters::with_front_matter(2);
        let counters = parse_chapter(&first, &options, &mut presentation, counters).unwrap();
        let counters = parse_chapter(&second, &options, &mut presentation, counters).unwrap();

        assert_eq!(counters, Counters { chapter: 2, slide: 5 });
        assert_eq!(presentation.chapters[1].id, "chap_2");
        assert_eq!(presentation.chapters[1].slides[0].id, "chap_2_1");
        assert_eq!(presentation.chapters[1].slides[0].number, 5);
    }

    #[test]
    fn failed_file_adds_nothing() {
        let mut presentation = Presentation::default();
        let source = ChapterSource::from_text("bad.md", "# A\n## One\n  stray");
        let err = parse_chapter(
            &source,
            &ParseOptions::default(),
            &mut presentation,
            Counters::default(),
        )
        .unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(presentation.chapters.is_empty());
    }
}
