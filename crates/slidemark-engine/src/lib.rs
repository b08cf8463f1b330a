pub mod error;
pub mod i18n;
pub mod io;
pub mod models;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use error::ParseError;
pub use i18n::{Label, Language};
pub use io::{ChapterSource, IoError};
pub use models::*;
pub use parsing::{Counters, ParseOptions, parse_chapter, resolve::resolve_references};
pub use render::{Renderer, render};

/// Parses every chapter in order, resolves references and builds the table
/// of contents.
///
/// Counters run across files: chapter and slide numbers continue from one
/// source to the next. The first failing file aborts the run.
pub fn compile(
    sources: &[ChapterSource],
    options: &ParseOptions,
    metadata: Metadata,
) -> Result<Presentation, ParseError> {
    let mut presentation = Presentation::new(metadata);
    let mut counters = Counters::with_front_matter(options.front_matter_pages);
    for source in sources {
        counters = parse_chapter(source, options, &mut presentation, counters)?;
    }
    resolve_references(&mut presentation);
    presentation.build_toc();
    log::info!(
        "Compiled {} chapters, {} slides",
        presentation.chapters.len(),
        presentation.slide_count()
    );
    Ok(presentation)
}
