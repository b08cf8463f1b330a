use anyhow::Result;

use crate::models::{
    Element, ElementId, LineAction, List, ListKind, Presentation, Slide, TableRow,
};

use super::{Renderer, callout};

/// Walks a presentation in document order, skipping hidden slides.
pub fn render<R: Renderer + ?Sized>(presentation: &Presentation, renderer: &mut R) -> Result<()> {
    renderer.presentation_start(presentation)?;
    for chapter in &presentation.chapters {
        renderer.chapter_start(chapter)?;
        for slide in chapter.slides.iter().filter(|s| !s.skip) {
            render_slide(slide, renderer)?;
        }
        renderer.chapter_end(chapter)?;
    }
    renderer.presentation_end(presentation)
}

fn render_slide<R: Renderer + ?Sized>(slide: &Slide, renderer: &mut R) -> Result<()> {
    renderer.slide_start(slide)?;
    for &id in slide.body() {
        render_element(slide, id, renderer)?;
    }
    renderer.slide_end(slide)
}

fn render_element<R: Renderer + ?Sized>(slide: &Slide, id: ElementId, r: &mut R) -> Result<()> {
    match slide.element(id) {
        Element::Text(text) => r.text(&text.render_nodes()),
        Element::Heading(heading) => r.heading(heading.level, &heading.title.render_nodes()),
        Element::Image(image) => r.image(image),
        Element::LineAction(action) => match action {
            LineAction::Button => r.button(),
            LineAction::ButtonWithLog => r.button_with_log(),
            LineAction::ButtonWithLogPre => r.button_with_log_pre(),
            LineAction::ButtonLinkPrevious => r.button_link_previous(),
            LineAction::LiveCss => r.live_css(),
            LineAction::LivePreview => r.live_preview(),
            LineAction::LivePreviewFloat => r.live_preview_float(),
        },
        Element::VerticalSpace => r.vertical_space(),
        Element::Html(html) => r.html(html),
        Element::Script(lines) => r.script(lines),
        Element::Equation(equation) => r.equation(equation),
        Element::List(list) => render_list(slide, list, r),
        Element::Table(table) => {
            r.table_start(table)?;
            r.table_header(&table.headers)?;
            for row in &table.rows {
                match row {
                    TableRow::Cells(cells) => r.table_row(cells)?,
                    TableRow::Separator => r.table_separator(table.headers.len())?,
                }
            }
            r.table_end()
        }
        Element::Quote(quote) => {
            let source = quote.source.as_ref().map(|s| s.render_nodes());
            r.quote(&quote.content.render_nodes(), source.as_deref())
        }
        Element::Callout(c) => callout(r, c.kind, &c.content.render_nodes()),
        Element::Source(source) => {
            r.code_start(source)?;
            for line in &source.lines {
                r.code_line(line)?;
            }
            r.code_end(source)
        }
        Element::Uml(uml) => r.uml(uml),
        Element::Comment(comment) => {
            r.comment_start()?;
            for &child in &comment.children {
                render_element(slide, child, r)?;
            }
            r.comment_end()
        }
        Element::MultipleChoice(group) => {
            r.multiple_choice_start(group)?;
            for question in &group.questions {
                r.multiple_choice(question.correct, &question.text.render_nodes())?;
            }
            r.multiple_choice_end(group)
        }
        Element::Matching(group) => {
            r.matching_question_start(&group.kind)?;
            for pair in &group.pairs {
                r.matching_question(&pair.left.render_nodes(), &pair.right.render_nodes())?;
            }
            r.matching_question_end()
        }
        Element::InputQuestion(question) => r.input_question(question),
    }
}

fn render_list<R: Renderer + ?Sized>(slide: &Slide, list: &List, r: &mut R) -> Result<()> {
    match list.kind {
        ListKind::Unordered => r.ul_start(list.level)?,
        ListKind::Ordered { start } => r.ol_start(list.level, start)?,
    }
    for item in &list.items {
        let content = item.text.render_nodes();
        match list.kind {
            ListKind::Unordered => r.ul_item(&content)?,
            ListKind::Ordered { .. } => r.ol_item(&content)?,
        }
        for &child in &item.children {
            render_element(slide, child, r)?;
        }
    }
    match list.kind {
        ListKind::Unordered => r.ul_end(list.level),
        ListKind::Ordered { .. } => r.ol_end(list.level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chapter, Comment, ListItem, Node, Source};
    use pretty_assertions::assert_eq;

    /// Records the name of every call.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Renderer for Recorder {
        fn chapter_start(&mut self, chapter: &Chapter) -> Result<()> {
            self.0.push(format!("chapter {}", chapter.title));
            Ok(())
        }
        fn chapter_end(&mut self, _: &Chapter) -> Result<()> {
            self.0.push("/chapter".into());
            Ok(())
        }
        fn slide_start(&mut self, slide: &Slide) -> Result<()> {
            self.0.push(format!("slide {}", slide.title));
            Ok(())
        }
        fn slide_end(&mut self, _: &Slide) -> Result<()> {
            self.0.push("/slide".into());
            Ok(())
        }
        fn comment_start(&mut self) -> Result<()> {
            self.0.push("notes".into());
            Ok(())
        }
        fn comment_end(&mut self) -> Result<()> {
            self.0.push("/notes".into());
            Ok(())
        }
        fn text(&mut self, content: &[Node]) -> Result<()> {
            self.0.push(format!("text {}", Node::plain_text(content)));
            Ok(())
        }
        fn ul_start(&mut self, level: u8) -> Result<()> {
            self.0.push(format!("ul{level}"));
            Ok(())
        }
        fn ul_item(&mut self, content: &[Node]) -> Result<()> {
            self.0.push(format!("item {}", Node::plain_text(content)));
            Ok(())
        }
        fn ul_end(&mut self, level: u8) -> Result<()> {
            self.0.push(format!("/ul{level}"));
            Ok(())
        }
        fn code_line(&mut self, line: &str) -> Result<()> {
            self.0.push(format!("code {line}"));
            Ok(())
        }
    }

    fn presentation() -> Presentation {
        let mut slide = Slide::new("A", "chap_1_1", 1, false);
        let outer = slide.push_root(Element::List(List::new(ListKind::Unordered, 1, None)));
        let inner = slide.alloc(Element::List(List::new(ListKind::Unordered, 2, Some(outer))));
        if let Element::List(list) = slide.element_mut(inner) {
            list.items.push(ListItem::new("a.1"));
        }
        if let Element::List(list) = slide.element_mut(outer) {
            let mut first = ListItem::new("a");
            first.children.push(inner);
            list.items.push(first);
            list.items.push(ListItem::new("b"));
        }
        let notes = slide.push_root(Element::Comment(Comment::default()));
        let mut source = Source::new("java");
        source.lines.push("x();".into());
        slide.push_into_comment(notes, Element::Source(source));

        let mut hidden = Slide::new("Hidden", "chap_1_2", 2, true);
        hidden.push_root(Element::Text("secret".into()));

        let mut chapter = Chapter::new("C", "chap_1");
        chapter.slides = vec![slide, hidden];
        Presentation {
            chapters: vec![chapter],
            ..Presentation::default()
        }
    }

    #[test]
    fn visits_in_document_order() {
        let mut recorder = Recorder::default();
        render(&presentation(), &mut recorder).unwrap();
        assert_eq!(
            recorder.0,
            [
                "chapter C",
                "slide A",
                "ul1",
                "item a",
                "ul2",
                "item a.1",
                "/ul2",
                "item b",
                "/ul1",
                "notes",
                "code x();",
                "/notes",
                "/slide",
                "/chapter",
            ]
        );
    }

    #[test]
    fn hidden_slides_are_never_rendered() {
        let mut recorder = Recorder::default();
        render(&presentation(), &mut recorder).unwrap();
        assert!(!recorder.0.iter().any(|call| call.contains("Hidden") || call.contains("secret")));
    }

    #[test]
    fn renderer_errors_stop_the_walk() {
        struct Failing;
        impl Renderer for Failing {
            fn ul_item(&mut self, _: &[Node]) -> Result<()> {
                anyhow::bail!("lists unsupported")
            }
        }
        let err = render(&presentation(), &mut Failing).unwrap_err();
        assert_eq!(err.to_string(), "lists unsupported");
    }
}
