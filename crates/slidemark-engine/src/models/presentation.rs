use serde::Serialize;

use super::{
    element::{Comment, Element, ElementId},
    reference::{Footnote, LinkDefinition},
};
use crate::i18n::{self, Label, Language};

/// Global information about a presentation, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Metadata {
    pub language: Language,
    pub title1: Option<String>,
    pub title2: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub description: Option<String>,
}

/// Root of the document model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Presentation {
    pub metadata: Metadata,
    pub chapters: Vec<Chapter>,
    pub toc: Toc,
    /// Text of every HTML comment met while parsing.
    pub comments: Vec<String>,
}

impl Presentation {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Rebuilds the table of contents from the parsed chapters. Hidden slides
    /// are left out.
    pub fn build_toc(&mut self) {
        let entries = self
            .chapters
            .iter()
            .map(|chapter| TocEntry {
                id: chapter.id.clone(),
                title: chapter.title.clone(),
                slides: chapter
                    .slides
                    .iter()
                    .filter(|s| !s.skip)
                    .map(|s| TocSlide {
                        id: s.id.clone(),
                        title: s.title.clone(),
                        number: s.number,
                    })
                    .collect(),
            })
            .collect();

        self.toc = Toc {
            title: i18n::label(self.metadata.language, Label::TableOfContents).to_string(),
            entries,
        };
    }

    /// Total number of slides over all chapters, hidden ones included.
    pub fn slide_count(&self) -> usize {
        self.chapters.iter().map(|c| c.slides.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Toc {
    pub title: String,
    pub entries: Vec<TocEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub slides: Vec<TocSlide>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocSlide {
    pub id: String,
    pub title: String,
    pub number: usize,
}

/// A chapter, opened by a `# title` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub id: String,
    pub slides: Vec<Slide>,
    pub links: Vec<LinkDefinition>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            slides: vec![],
            links: vec![],
        }
    }
}

/// A slide, opened by a `## title` line.
///
/// All elements of the slide live in one arena; `body` lists the top-level
/// ones in order and composite elements refer to their children by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub title: String,
    pub id: String,
    /// Page number, front matter included.
    pub number: usize,
    /// Hidden slides are parsed but never rendered.
    pub skip: bool,
    /// Value of a `<!-- Spacing: N -->` directive.
    pub spacing: Option<u32>,
    pub footnotes: Vec<Footnote>,
    pub(crate) elements: Vec<Element>,
    pub(crate) body: Vec<ElementId>,
}

impl Slide {
    pub fn new(title: impl Into<String>, id: impl Into<String>, number: usize, skip: bool) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            number,
            skip,
            spacing: None,
            footnotes: vec![],
            elements: vec![],
            body: vec![],
        }
    }

    /// Top-level elements in document order.
    pub fn body(&self) -> &[ElementId] {
        &self.body
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Top-level elements, resolved.
    pub fn top_level(&self) -> impl Iterator<Item = &Element> {
        self.body.iter().map(|id| self.element(*id))
    }

    /// Stores an element in the arena without placing it anywhere.
    pub fn alloc(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Appends an element to the slide body.
    pub fn push_root(&mut self, element: Element) -> ElementId {
        let id = self.alloc(element);
        self.body.push(id);
        id
    }

    /// Appends an element to an open speaker-notes container.
    pub fn push_into_comment(&mut self, comment: ElementId, element: Element) -> ElementId {
        let id = self.alloc(element);
        if let Element::Comment(Comment { children }) = self.element_mut(comment) {
            children.push(id);
        }
        id
    }

    /// All reachable element ids, depth first in document order.
    pub fn walk(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementId> = self.body.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.element(id).child_ids().into_iter().rev());
        }
        out
    }

    /// Highest step-reveal order of any element, 0 when nothing is animated.
    pub fn animation_order(&self) -> u32 {
        self.walk()
            .into_iter()
            .filter_map(|id| self.element(id).order())
            .max()
            .unwrap_or(0)
    }

    pub fn footnote(&self, key: &str) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::{List, ListItem, ListKind, Source};

    fn slide() -> Slide {
        Slide::new("S", "chap_1_1", 1, false)
    }

    #[test]
    fn walk_visits_nested_lists_depth_first() {
        let mut s = slide();
        let outer = s.push_root(Element::List(List::new(ListKind::Unordered, 1, None)));
        let inner = s.alloc(Element::List(List::new(ListKind::Unordered, 2, Some(outer))));
        if let Element::List(list) = s.element_mut(outer) {
            let mut item = ListItem::new("a");
            item.children.push(inner);
            list.items.push(item);
        }
        let text = s.push_root(Element::Text("after".into()));

        assert_eq!(s.walk(), vec![outer, inner, text]);
    }

    #[test]
    fn push_into_comment_records_child() {
        let mut s = slide();
        let comment = s.push_root(Element::Comment(Comment::default()));
        let note = s.push_into_comment(comment, Element::Text("note".into()));
        assert_eq!(s.body(), &[comment]);
        assert_eq!(s.element(comment).child_ids(), vec![note]);
    }

    #[test]
    fn animation_order_is_highest_source_order() {
        let mut s = slide();
        assert_eq!(s.animation_order(), 0);
        let mut a = Source::new("java");
        a.order = Some(2);
        let mut b = Source::new("java");
        b.order = Some(5);
        s.push_root(Element::Source(a));
        s.push_root(Element::Source(b));
        assert_eq!(s.animation_order(), 5);
    }

    #[test]
    fn toc_skips_hidden_slides_and_is_localized() {
        let mut p = Presentation::new(Metadata {
            language: Language::German,
            ..Metadata::default()
        });
        let mut chapter = Chapter::new("One", "chap_1");
        chapter.slides.push(Slide::new("A", "chap_1_1", 1, false));
        chapter.slides.push(Slide::new("B", "chap_1_2", 2, true));
        p.chapters.push(chapter);

        p.build_toc();

        assert_eq!(p.toc.title, "Inhaltsverzeichnis");
        assert_eq!(p.toc.entries.len(), 1);
        let titles: Vec<&str> = p.toc.entries[0]
            .slides
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["A"]);
        assert_eq!(p.slide_count(), 2);
    }
}
