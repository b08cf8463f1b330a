//! Reference resolution, the second pass.
//!
//! Runs once every chapter has been parsed. Footnote texts are parsed
//! first so references to them can carry the finished nodes; then every
//! text-bearing element is rewritten for reference-style links, parsed, and
//! gets its node tree attached.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::models::{LinkDefinition, Presentation, Slide};

use super::inline::{InlineContext, parse_inline};

/// Resolves every chapter of the presentation.
pub fn resolve_references(presentation: &mut Presentation) {
    for chapter in &mut presentation.chapters {
        for slide in &mut chapter.slides {
            resolve_slide(slide, &chapter.links);
        }
    }
}

/// Attaches inline nodes to the footnotes and elements of one slide.
pub fn resolve_slide(slide: &mut Slide, links: &[LinkDefinition]) {
    let plain = InlineContext::default();
    for footnote in &mut slide.footnotes {
        let content = substitute_links(footnote.text.content(), links, &slide.id);
        let nodes = parse_inline(&content, &plain);
        footnote.text.attach(nodes);
    }

    let ctx = InlineContext::new(&slide.footnotes);
    for id in slide.walk() {
        for text in slide.elements[id.0].rich_texts_mut() {
            let content = substitute_links(text.content(), links, &slide.id);
            let nodes = parse_inline(&content, &ctx);
            text.attach(nodes);
        }
    }
}

/// Rewrites `[label][ref]` and `[label][]` to inline links using the
/// chapter's definitions. Unknown references are left as written.
pub fn substitute_links<'a>(content: &'a str, links: &[LinkDefinition], slide: &str) -> Cow<'a, str> {
    static REFERENCE: OnceLock<Regex> = OnceLock::new();
    let reference = REFERENCE.get_or_init(|| {
        Regex::new(r"\[([^\[\]]+)\]\[([^\[\]^]*)\]").expect("Invalid link reference regex")
    });

    reference.replace_all(content, |caps: &Captures<'_>| {
        let label = &caps[1];
        let key = match &caps[2] {
            "" => label,
            key => key,
        };
        match links.iter().find(|link| link.matches(key)) {
            Some(link) => link.inline_form(label),
            None => {
                log::warn!("{slide}: unresolved link reference [{key}]");
                caps[0].to_string()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Chapter, Element, Footnote, List, ListItem, ListKind, Node, Table, TableHeader, TableRow,
    };
    use pretty_assertions::assert_eq;

    fn rust_link() -> LinkDefinition {
        LinkDefinition {
            key: "rust".into(),
            target: "https://rust-lang.org".into(),
            title: Some("Rust".into()),
        }
    }

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn substitutes_known_references() {
        let links = [rust_link()];
        assert_eq!(
            substitute_links("see [the site][Rust] and [rust][]", &links, "s"),
            r#"see [the site](https://rust-lang.org "Rust") and [rust](https://rust-lang.org "Rust")"#
        );
    }

    #[test]
    fn unknown_reference_is_left_alone() {
        assert_eq!(substitute_links("[a][nope]", &[], "s"), "[a][nope]");
        assert!(matches!(
            substitute_links("no refs", &[], "s"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn resolves_texts_inside_lists_and_tables() {
        let mut slide = Slide::new("S", "chap_1_1", 1, false);
        slide.footnotes.push(Footnote::new("1", 1, "**Note**"));
        let list = slide.push_root(Element::List(List::new(ListKind::Unordered, 1, None)));
        let nested = slide.alloc(Element::List(List::new(ListKind::Unordered, 2, Some(list))));
        if let Element::List(l) = slide.element_mut(nested) {
            l.items.push(ListItem::new("deep[^1]"));
        }
        if let Element::List(l) = slide.element_mut(list) {
            let mut item = ListItem::new("*top*");
            item.children.push(nested);
            l.items.push(item);
        }
        let table = slide.push_root(Element::Table(Table {
            headers: vec![TableHeader {
                text: "[docs][rust]".into(),
                align: Default::default(),
            }],
            rows: vec![TableRow::Cells(vec!["`x`".into()]), TableRow::Separator],
        }));

        resolve_slide(&mut slide, &[rust_link()]);

        let Element::List(outer) = slide.element(list) else {
            panic!("expected list");
        };
        assert_eq!(
            outer.items[0].text.nodes(),
            Some(&[Node::Emphasis(vec![text("top")])][..])
        );
        let Element::List(inner) = slide.element(nested) else {
            panic!("expected list");
        };
        assert_eq!(
            inner.items[0].text.nodes(),
            Some(
                &[
                    text("deep"),
                    Node::FootnoteRef {
                        key: "1".into(),
                        number: 1,
                        children: vec![Node::Strong(vec![text("Note")])],
                    },
                ][..]
            )
        );

        let Element::Table(table) = slide.element(table) else {
            panic!("expected table");
        };
        assert_eq!(
            table.headers[0].text.nodes(),
            Some(
                &[Node::Link {
                    href: "https://rust-lang.org".into(),
                    title: Some("Rust".into()),
                    children: vec![text("docs")],
                }][..]
            )
        );
        assert!(matches!(&table.rows[0], TableRow::Cells(cells) if cells[0].nodes() == Some(&[Node::Code("x".into())][..])));
    }

    #[test]
    fn resolves_every_chapter() {
        let mut presentation = Presentation::default();
        let mut chapter = Chapter::new("C", "chap_1");
        chapter.links.push(rust_link());
        let mut slide = Slide::new("S", "chap_1_1", 1, false);
        slide.push_root(Element::Text("[Rust][]".into()));
        chapter.slides.push(slide);
        presentation.chapters.push(chapter);

        resolve_references(&mut presentation);

        let slide = &presentation.chapters[0].slides[0];
        let Some(Element::Text(t)) = slide.top_level().next() else {
            panic!("expected text");
        };
        assert!(matches!(t.nodes(), Some([Node::Link { .. }])));
    }
}
