//! # Rendering
//!
//! The contract between a resolved [`Presentation`] and an output format.
//! [`render`] walks the tree in document order and calls one [`Renderer`]
//! method per construct; containers get exactly one start and one end call.
//! Hidden slides produce no calls at all.
//!
//! Every method has an empty default, so a renderer only implements what
//! its format supports.

pub mod walker;

use anyhow::Result;

use crate::models::{
    CalloutKind, Chapter, Equation, Image, InputQuestion, MultipleChoiceQuestions, Node,
    Presentation, RichText, Slide, Source, Table, TableHeader, Uml,
};

pub use walker::render;

#[allow(unused_variables)]
pub trait Renderer {
    fn presentation_start(&mut self, presentation: &Presentation) -> Result<()> {
        Ok(())
    }
    fn presentation_end(&mut self, presentation: &Presentation) -> Result<()> {
        Ok(())
    }

    fn chapter_start(&mut self, chapter: &Chapter) -> Result<()> {
        Ok(())
    }
    fn chapter_end(&mut self, chapter: &Chapter) -> Result<()> {
        Ok(())
    }

    fn slide_start(&mut self, slide: &Slide) -> Result<()> {
        Ok(())
    }
    fn slide_end(&mut self, slide: &Slide) -> Result<()> {
        Ok(())
    }

    /// Speaker notes.
    fn comment_start(&mut self) -> Result<()> {
        Ok(())
    }
    fn comment_end(&mut self) -> Result<()> {
        Ok(())
    }

    /// A heading of level 3 to 5.
    fn heading(&mut self, level: u8, title: &[Node]) -> Result<()> {
        Ok(())
    }
    fn text(&mut self, content: &[Node]) -> Result<()> {
        Ok(())
    }

    fn ul_start(&mut self, level: u8) -> Result<()> {
        Ok(())
    }
    /// One item. Nested lists of the item follow before the next item.
    fn ul_item(&mut self, content: &[Node]) -> Result<()> {
        Ok(())
    }
    fn ul_end(&mut self, level: u8) -> Result<()> {
        Ok(())
    }

    fn ol_start(&mut self, level: u8, start: u32) -> Result<()> {
        Ok(())
    }
    fn ol_item(&mut self, content: &[Node]) -> Result<()> {
        Ok(())
    }
    fn ol_end(&mut self, level: u8) -> Result<()> {
        Ok(())
    }

    fn quote(&mut self, content: &[Node], source: Option<&[Node]>) -> Result<()> {
        Ok(())
    }
    fn important(&mut self, content: &[Node]) -> Result<()> {
        Ok(())
    }
    fn question(&mut self, content: &[Node]) -> Result<()> {
        Ok(())
    }
    fn info_box(&mut self, content: &[Node]) -> Result<()> {
        Ok(())
    }

    fn table_start(&mut self, table: &Table) -> Result<()> {
        Ok(())
    }
    fn table_header(&mut self, headers: &[TableHeader]) -> Result<()> {
        Ok(())
    }
    fn table_row(&mut self, cells: &[RichText]) -> Result<()> {
        Ok(())
    }
    fn table_separator(&mut self, columns: usize) -> Result<()> {
        Ok(())
    }
    fn table_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn code_start(&mut self, source: &Source) -> Result<()> {
        Ok(())
    }
    /// One verbatim line of a code block.
    fn code_line(&mut self, line: &str) -> Result<()> {
        Ok(())
    }
    fn code_end(&mut self, source: &Source) -> Result<()> {
        Ok(())
    }

    fn image(&mut self, image: &Image) -> Result<()> {
        Ok(())
    }
    fn uml(&mut self, uml: &Uml) -> Result<()> {
        Ok(())
    }
    fn equation(&mut self, equation: &Equation) -> Result<()> {
        Ok(())
    }
    fn html(&mut self, html: &str) -> Result<()> {
        Ok(())
    }
    fn script(&mut self, lines: &[String]) -> Result<()> {
        Ok(())
    }
    fn vertical_space(&mut self) -> Result<()> {
        Ok(())
    }

    fn multiple_choice_start(&mut self, group: &MultipleChoiceQuestions) -> Result<()> {
        Ok(())
    }
    fn multiple_choice(&mut self, correct: bool, content: &[Node]) -> Result<()> {
        Ok(())
    }
    fn multiple_choice_end(&mut self, group: &MultipleChoiceQuestions) -> Result<()> {
        Ok(())
    }

    fn matching_question_start(&mut self, kind: &str) -> Result<()> {
        Ok(())
    }
    fn matching_question(&mut self, left: &[Node], right: &[Node]) -> Result<()> {
        Ok(())
    }
    fn matching_question_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn input_question(&mut self, question: &InputQuestion) -> Result<()> {
        Ok(())
    }

    fn button(&mut self) -> Result<()> {
        Ok(())
    }
    fn button_with_log(&mut self) -> Result<()> {
        Ok(())
    }
    fn button_with_log_pre(&mut self) -> Result<()> {
        Ok(())
    }
    fn button_link_previous(&mut self) -> Result<()> {
        Ok(())
    }
    fn live_css(&mut self) -> Result<()> {
        Ok(())
    }
    fn live_preview(&mut self) -> Result<()> {
        Ok(())
    }
    fn live_preview_float(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Dispatches a callout to `important`, `question` or `info_box`.
pub(crate) fn callout<R: Renderer + ?Sized>(
    renderer: &mut R,
    kind: CalloutKind,
    content: &[Node],
) -> Result<()> {
    match kind {
        CalloutKind::Important => renderer.important(content),
        CalloutKind::Question => renderer.question(content),
        CalloutKind::Box => renderer.info_box(content),
    }
}
