use std::fmt::{Display, Write};

use anyhow::Result;
use slidemark_engine::{
    Chapter, Image, Language, MultipleChoiceQuestions, Node, Presentation, Renderer, Slide, Source,
    Table,
    i18n::{Label, label},
};

/// Renders a presentation as an indented plain-text outline.
pub struct OutlineRenderer {
    language: Language,
    out: String,
    indent: usize,
    chapters: usize,
    hidden: usize,
    /// Next number of each open list, `None` for bullet lists.
    lists: Vec<Option<u32>>,
}

const SLIDE_INDENT: usize = 2;
const BODY_INDENT: usize = 4;

impl OutlineRenderer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            out: String::new(),
            indent: BODY_INDENT,
            chapters: 0,
            hidden: 0,
            lists: vec![],
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, indent: usize, text: impl Display) -> Result<()> {
        writeln!(self.out, "{:indent$}{text}", "")?;
        Ok(())
    }

    fn body(&mut self, text: impl Display) -> Result<()> {
        self.line(self.indent, text)
    }

    fn list_item(&mut self, content: &[Node]) -> Result<()> {
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(next)) => {
                let marker = format!("{next}.");
                *next += 1;
                marker
            }
            _ => "*".to_string(),
        };
        self.line(self.indent + 2 * depth, format!("{marker} {}", flat(content)))
    }

    fn label(&self, l: Label) -> &'static str {
        label(self.language, l)
    }
}

/// Plain text of an inline tree on a single line.
fn flat(nodes: &[Node]) -> String {
    Node::plain_text(nodes).replace('\n', " ")
}

impl Renderer for OutlineRenderer {
    fn presentation_start(&mut self, presentation: &Presentation) -> Result<()> {
        self.hidden = presentation
            .chapters
            .iter()
            .flat_map(|c| &c.slides)
            .filter(|s| s.skip)
            .count();
        if let Some(title) = &presentation.metadata.title1 {
            self.line(0, title)?;
        }
        Ok(())
    }

    fn presentation_end(&mut self, _: &Presentation) -> Result<()> {
        if self.hidden > 0 {
            let hidden = format!("({} {})", self.hidden, self.label(Label::Hidden));
            self.line(0, hidden)?;
        }
        Ok(())
    }

    fn chapter_start(&mut self, chapter: &Chapter) -> Result<()> {
        self.chapters += 1;
        let heading = format!("{} {}: {}", self.label(Label::Chapter), self.chapters, chapter.title);
        self.line(0, heading)
    }

    fn slide_start(&mut self, slide: &Slide) -> Result<()> {
        let heading = format!("{} {}: {}", self.label(Label::Slide), slide.number, slide.title);
        self.line(SLIDE_INDENT, heading)
    }

    fn comment_start(&mut self) -> Result<()> {
        let notes = format!("{}:", self.label(Label::Notes));
        self.body(notes)?;
        self.indent += 2;
        Ok(())
    }

    fn comment_end(&mut self) -> Result<()> {
        self.indent -= 2;
        Ok(())
    }

    fn heading(&mut self, level: u8, title: &[Node]) -> Result<()> {
        self.body(format!("{} {}", "#".repeat(level.into()), flat(title)))
    }

    fn text(&mut self, content: &[Node]) -> Result<()> {
        self.body(flat(content))
    }

    fn ul_start(&mut self, _: u8) -> Result<()> {
        self.lists.push(None);
        Ok(())
    }

    fn ul_item(&mut self, content: &[Node]) -> Result<()> {
        self.list_item(content)
    }

    fn ul_end(&mut self, _: u8) -> Result<()> {
        self.lists.pop();
        Ok(())
    }

    fn ol_start(&mut self, _: u8, start: u32) -> Result<()> {
        self.lists.push(Some(start));
        Ok(())
    }

    fn ol_item(&mut self, content: &[Node]) -> Result<()> {
        self.list_item(content)
    }

    fn ol_end(&mut self, _: u8) -> Result<()> {
        self.lists.pop();
        Ok(())
    }

    fn quote(&mut self, content: &[Node], source: Option<&[Node]>) -> Result<()> {
        match source {
            Some(source) => {
                let source = format!("({}: {})", self.label(Label::Source), flat(source));
                self.body(format!("> {} {source}", flat(content)))
            }
            None => self.body(format!("> {}", flat(content))),
        }
    }

    fn important(&mut self, content: &[Node]) -> Result<()> {
        self.body(format!("! {}", flat(content)))
    }

    fn question(&mut self, content: &[Node]) -> Result<()> {
        self.body(format!("? {}", flat(content)))
    }

    fn info_box(&mut self, content: &[Node]) -> Result<()> {
        self.body(format!(": {}", flat(content)))
    }

    fn table_start(&mut self, table: &Table) -> Result<()> {
        self.body(format!("[table {}x{}]", table.headers.len(), table.rows.len()))
    }

    fn code_start(&mut self, source: &Source) -> Result<()> {
        self.body(format!("```{}", source.language))
    }

    fn code_line(&mut self, line: &str) -> Result<()> {
        self.body(line)
    }

    fn code_end(&mut self, _: &Source) -> Result<()> {
        self.body("```")
    }

    fn image(&mut self, image: &Image) -> Result<()> {
        self.body(format!("[image {}]", image.location))
    }

    fn multiple_choice_start(&mut self, _: &MultipleChoiceQuestions) -> Result<()> {
        Ok(())
    }

    fn multiple_choice(&mut self, correct: bool, content: &[Node]) -> Result<()> {
        let mark = if correct { 'x' } else { ' ' };
        self.body(format!("[{mark}] {}", flat(content)))
    }

    fn matching_question(&mut self, left: &[Node], right: &[Node]) -> Result<()> {
        self.body(format!("{} -> {}", flat(left), flat(right)))
    }
}
