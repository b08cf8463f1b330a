use serde::Serialize;

use super::node::RichText;

/// Index of an element in its slide's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

/// A content element of a slide.
///
/// Composite variants refer to their children by [`ElementId`]; the children
/// live in the same slide arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Element {
    Text(RichText),
    Heading(Heading),
    Image(Image),
    LineAction(LineAction),
    VerticalSpace,
    Html(String),
    Script(Vec<String>),
    Equation(Equation),
    List(List),
    Table(Table),
    Quote(Quote),
    Callout(Callout),
    Source(Source),
    Uml(Uml),
    Comment(Comment),
    MultipleChoice(MultipleChoiceQuestions),
    Matching(MatchingQuestions),
    InputQuestion(InputQuestion),
}

impl Element {
    /// Every piece of user text carried directly by this element, in
    /// document order. Child elements are not included.
    pub fn rich_texts_mut(&mut self) -> Vec<&mut RichText> {
        match self {
            Element::Text(text) => vec![text],
            Element::Heading(h) => vec![&mut h.title],
            Element::List(list) => list.items.iter_mut().map(|i| &mut i.text).collect(),
            Element::Table(table) => {
                let mut out: Vec<&mut RichText> =
                    table.headers.iter_mut().map(|h| &mut h.text).collect();
                for row in &mut table.rows {
                    if let TableRow::Cells(cells) = row {
                        out.extend(cells.iter_mut());
                    }
                }
                out
            }
            Element::Quote(quote) => {
                let mut out = vec![&mut quote.content];
                if let Some(source) = &mut quote.source {
                    out.push(source);
                }
                out
            }
            Element::Callout(callout) => vec![&mut callout.content],
            Element::MultipleChoice(group) => {
                group.questions.iter_mut().map(|q| &mut q.text).collect()
            }
            Element::Matching(group) => group
                .pairs
                .iter_mut()
                .flat_map(|p| [&mut p.left, &mut p.right])
                .collect(),
            Element::Image(_)
            | Element::LineAction(_)
            | Element::VerticalSpace
            | Element::Html(_)
            | Element::Script(_)
            | Element::Equation(_)
            | Element::Source(_)
            | Element::Uml(_)
            | Element::Comment(_)
            | Element::InputQuestion(_) => vec![],
        }
    }

    /// Ids of the elements nested directly inside this one.
    pub fn child_ids(&self) -> Vec<ElementId> {
        match self {
            Element::List(list) => list
                .items
                .iter()
                .flat_map(|i| i.children.iter().copied())
                .collect(),
            Element::Comment(comment) => comment.children.clone(),
            _ => vec![],
        }
    }

    /// The explicit animation order attached to this element, if any.
    pub fn order(&self) -> Option<u32> {
        match self {
            Element::Source(source) => source.order,
            _ => None,
        }
    }
}

/// Heading of level 3 to 5 inside a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub title: RichText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub alt: String,
    pub location: String,
    pub title: Option<String>,
    /// Width when shown on a slide.
    pub width_slide: Option<String>,
    /// Width in the plain (handout) rendering.
    pub width_plain: Option<String>,
}

/// Interactive line actions placed on a line of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineAction {
    Button,
    ButtonWithLog,
    ButtonWithLogPre,
    ButtonLinkPrevious,
    LiveCss,
    LivePreview,
    LivePreviewFloat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Equation {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListKind {
    Unordered,
    Ordered { start: u32 },
}

impl ListKind {
    /// Whether two kinds can share one list (ordered start numbers do not matter).
    pub fn same_shape(self, other: ListKind) -> bool {
        matches!(
            (self, other),
            (ListKind::Unordered, ListKind::Unordered)
                | (ListKind::Ordered { .. }, ListKind::Ordered { .. })
        )
    }
}

/// An ordered or unordered list at nesting level 1 to 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub kind: ListKind,
    pub level: u8,
    /// The enclosing list. Only used while parsing to walk back up a level.
    pub parent: Option<ElementId>,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn new(kind: ListKind, level: u8, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            level,
            parent,
            items: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub text: RichText,
    /// Nested lists, in order.
    pub children: Vec<ElementId>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RichText::new(text),
            children: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Alignment {
    #[default]
    Default,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHeader {
    pub text: RichText,
    pub align: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableRow {
    Cells(Vec<RichText>),
    /// A separator line between body rows.
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    pub headers: Vec<TableHeader>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Quote {
    pub content: RichText,
    /// Attribution given with `>>` lines.
    pub source: Option<RichText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalloutKind {
    Important,
    Question,
    Box,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Callout {
    pub kind: CalloutKind,
    pub content: RichText,
}

/// A code block, fenced, indented or included from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub language: String,
    pub caption: Option<String>,
    /// Step-reveal order of the block.
    pub order: Option<u32>,
    pub lines: Vec<String>,
}

impl Source {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            caption: None,
            order: None,
            lines: vec![],
        }
    }

    /// All lines, each terminated by `\n`.
    pub fn content(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uml {
    pub name: String,
    pub lines: Vec<String>,
    pub width_slide: String,
    pub width_plain: String,
}

/// Speaker notes opened and closed by `---` lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Comment {
    pub children: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipleChoice {
    pub correct: bool,
    pub text: RichText,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MultipleChoiceQuestions {
    /// Render the choices on one line.
    pub inline: bool,
    pub questions: Vec<MultipleChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingPair {
    pub left: RichText,
    pub right: RichText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingQuestions {
    /// The `type` attribute of the `SHUFFLE` directive.
    pub kind: String,
    pub pairs: Vec<MatchingPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InputQuestion {
    pub answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_texts_skip_separator_rows() {
        let mut el = Element::Table(Table {
            headers: vec![TableHeader {
                text: "h".into(),
                align: Alignment::Default,
            }],
            rows: vec![
                TableRow::Cells(vec!["a".into()]),
                TableRow::Separator,
                TableRow::Cells(vec!["b".into()]),
            ],
        });
        let texts: Vec<String> = el
            .rich_texts_mut()
            .into_iter()
            .map(|t| t.content().to_string())
            .collect();
        assert_eq!(texts, ["h", "a", "b"]);
    }

    #[test]
    fn source_content_terminates_every_line() {
        let mut source = Source::new("java");
        source.lines = vec!["int i = 0;".into(), "".into()];
        assert_eq!(source.content(), "int i = 0;\n\n");
    }

    #[test]
    fn list_children_are_collected_in_item_order() {
        let mut list = List::new(ListKind::Unordered, 1, None);
        let mut first = ListItem::new("a");
        first.children.push(ElementId(4));
        let mut second = ListItem::new("b");
        second.children.push(ElementId(7));
        list.items = vec![first, second];
        assert_eq!(
            Element::List(list).child_ids(),
            vec![ElementId(4), ElementId(7)]
        );
    }

    #[test]
    fn ordered_lists_share_shape_regardless_of_start() {
        assert!(ListKind::Ordered { start: 1 }.same_shape(ListKind::Ordered { start: 5 }));
        assert!(!ListKind::Ordered { start: 1 }.same_shape(ListKind::Unordered));
    }
}
