use crate::models::{Element, ElementId, Slide};

/// Where new elements of the current slide go.
///
/// Between two `---` lines elements are collected inside a speaker-notes
/// container instead of the slide body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionTarget {
    #[default]
    Body,
    Comment(ElementId),
}

impl InsertionTarget {
    pub fn push(self, slide: &mut Slide, element: Element) -> ElementId {
        match self {
            InsertionTarget::Body => slide.push_root(element),
            InsertionTarget::Comment(comment) => slide.push_into_comment(comment, element),
        }
    }

    /// The element most recently added at this target.
    pub fn last(self, slide: &Slide) -> Option<ElementId> {
        match self {
            InsertionTarget::Body => slide.body().last().copied(),
            InsertionTarget::Comment(comment) => slide.element(comment).child_ids().last().copied(),
        }
    }
}

/// The list the next item at `level` is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    pub id: ElementId,
    pub level: u8,
}
