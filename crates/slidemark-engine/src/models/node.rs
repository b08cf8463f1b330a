use std::borrow::Cow;

use serde::Serialize;

/// A node of the inline tree attached to every text-bearing element.
///
/// A node is either still [`Node::Unparsed`] (raw text waiting for the inline
/// parser) or resolved. Once a span has been recognised its children replace
/// the raw text it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    /// Raw text the inline parser has not looked at yet.
    Unparsed(String),
    /// Literal text.
    Text(String),
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    /// Code span content. Never parsed further.
    Code(String),
    Link {
        href: String,
        title: Option<String>,
        children: Vec<Node>,
    },
    /// Text between double quotes.
    Quoted(Vec<Node>),
    /// A `[[key]]` citation.
    Citation(String),
    /// A `[^key]` reference to a footnote of the current slide.
    FootnoteRef {
        key: String,
        /// 1-based number of the footnote within its slide.
        number: usize,
        /// The footnote's own resolved text.
        children: Vec<Node>,
    },
    Superscript(Vec<Node>),
    Subscript(Vec<Node>),
    Deleted(Vec<Node>),
    Underline(Vec<Node>),
    /// Inline math, kept verbatim.
    Formula(String),
    /// Inline HTML passed through verbatim.
    Html(String),
    /// A literal line break (`<br>`).
    LineBreak,
}

impl Node {
    /// Returns true for text the inline parser still has to visit.
    pub fn is_unparsed(&self) -> bool {
        matches!(self, Node::Unparsed(_))
    }

    /// Child nodes of a span, `None` for leaves.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Emphasis(c)
            | Node::Strong(c)
            | Node::Quoted(c)
            | Node::Superscript(c)
            | Node::Subscript(c)
            | Node::Deleted(c)
            | Node::Underline(c) => Some(c),
            Node::Link { children, .. } | Node::FootnoteRef { children, .. } => Some(children),
            Node::Unparsed(_)
            | Node::Text(_)
            | Node::Code(_)
            | Node::Citation(_)
            | Node::Formula(_)
            | Node::Html(_)
            | Node::LineBreak => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Emphasis(c)
            | Node::Strong(c)
            | Node::Quoted(c)
            | Node::Superscript(c)
            | Node::Subscript(c)
            | Node::Deleted(c)
            | Node::Underline(c) => Some(c),
            Node::Link { children, .. } | Node::FootnoteRef { children, .. } => Some(children),
            Node::Unparsed(_)
            | Node::Text(_)
            | Node::Code(_)
            | Node::Citation(_)
            | Node::Formula(_)
            | Node::Html(_)
            | Node::LineBreak => None,
        }
    }

    /// True when neither this node nor any descendant is unparsed.
    pub fn is_resolved(&self) -> bool {
        !self.is_unparsed()
            && self
                .children()
                .is_none_or(|children| children.iter().all(Node::is_resolved))
    }

    /// Flattens nodes to their visible text, dropping all markup.
    pub fn plain_text(nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Unparsed(s) | Node::Text(s) | Node::Code(s) | Node::Formula(s) => {
                    out.push_str(s)
                }
                Node::Citation(key) => out.push_str(key),
                Node::Html(_) => {}
                Node::LineBreak => out.push('\n'),
                Node::FootnoteRef { number, .. } => out.push_str(&number.to_string()),
                other => {
                    if let Some(children) = other.children() {
                        out.push_str(&Node::plain_text(children));
                    }
                }
            }
        }
        out
    }
}

/// The user text of an element: the raw content gathered by the block parser
/// and, once the reference resolver has run, its inline node tree.
///
/// Appending to the raw content drops any attached nodes, so the two views
/// never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RichText {
    content: String,
    nodes: Option<Vec<Node>>,
}

impl RichText {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            nodes: None,
        }
    }

    /// The raw content as written in the source.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Appends a continuation line, separated by `\n`.
    pub fn push_line(&mut self, line: &str) {
        if !self.content.is_empty() {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.nodes = None;
    }

    /// The resolved inline nodes, if the resolver has run.
    pub fn nodes(&self) -> Option<&[Node]> {
        self.nodes.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.nodes.is_some()
    }

    /// Attaches the inline tree produced for this content.
    pub fn attach(&mut self, nodes: Vec<Node>) {
        self.nodes = Some(nodes);
    }

    /// Nodes for rendering: the attached tree, or the raw content as a single
    /// text node when nothing has been resolved yet.
    pub fn render_nodes(&self) -> Cow<'_, [Node]> {
        match &self.nodes {
            Some(nodes) => Cow::Borrowed(nodes),
            None if self.content.is_empty() => Cow::Owned(vec![]),
            None => Cow::Owned(vec![Node::Text(self.content.clone())]),
        }
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        RichText::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_line_joins_with_newline() {
        let mut text = RichText::new("first");
        text.push_line("second");
        assert_eq!(text.content(), "first\nsecond");
    }

    #[test]
    fn push_line_on_empty_content_has_no_leading_newline() {
        let mut text = RichText::default();
        text.push_line("only");
        assert_eq!(text.content(), "only");
    }

    #[test]
    fn push_line_drops_stale_nodes() {
        let mut text = RichText::new("a");
        text.attach(vec![Node::Text("a".into())]);
        assert!(text.is_resolved());
        text.push_line("b");
        assert!(!text.is_resolved());
    }

    #[test]
    fn render_nodes_prefers_attached_tree() {
        let mut text = RichText::new("**a**");
        assert_eq!(
            text.render_nodes().as_ref(),
            &[Node::Text("**a**".into())][..]
        );
        text.attach(vec![Node::Strong(vec![Node::Text("a".into())])]);
        assert_eq!(
            text.render_nodes().as_ref(),
            &[Node::Strong(vec![Node::Text("a".into())])][..]
        );
    }

    #[test]
    fn plain_text_strips_markup() {
        let nodes = vec![
            Node::Text("a ".into()),
            Node::Strong(vec![Node::Emphasis(vec![Node::Text("b".into())])]),
            Node::Code(" c".into()),
        ];
        assert_eq!(Node::plain_text(&nodes), "a b c");
    }

    #[test]
    fn unparsed_descendant_is_not_resolved() {
        let node = Node::Strong(vec![Node::Unparsed("x".into())]);
        assert!(!node.is_resolved());
        assert!(Node::Strong(vec![Node::Text("x".into())]).is_resolved());
    }
}
