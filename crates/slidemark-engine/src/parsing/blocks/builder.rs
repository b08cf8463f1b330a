use std::path::{Path, PathBuf};

use crate::error::ParseError;
use crate::io::{self, IoError};
use crate::models::{
    Callout, CalloutKind, Chapter, Comment, Element, ElementId, Equation, Footnote, Heading,
    InputQuestion, List, ListItem, MatchingPair, MatchingQuestions, MultipleChoice,
    MultipleChoiceQuestions, Quote, RichText, Slide, Source, Table, TableHeader, TableRow, Uml,
};
use crate::parsing::Counters;

use super::{
    classify::{LineClass, LineClassifier},
    containers::{InsertionTarget, ListCursor},
    kinds::{
        Choice, CodeFence, Directive, EquationFence, Fence, Include, IndentedCode, ListLine,
        ListMarker, MatchingEntry, QuoteKind, QuoteLine, ScriptFence, TableLine, UmlFence,
        indent, is_blank,
    },
    state::ParserState,
};

const DEFAULT_UML_WIDTH: &str = "100%";

/// What one chapter file produced.
#[derive(Debug)]
pub struct BuildOutput {
    pub chapters: Vec<Chapter>,
    pub comments: Vec<String>,
    pub counters: Counters,
}

/// The line being processed, for diagnostics.
#[derive(Debug, Default)]
struct Position {
    file: String,
    line: usize,
    content: String,
}

impl Position {
    fn syntax(&self, state: ParserState, reason: &str) -> ParseError {
        ParseError::Syntax {
            file: self.file.clone(),
            line: self.line,
            state,
            content: self.content.clone(),
            reason: reason.to_string(),
        }
    }

    fn structural(&self, state: ParserState, reason: &str) -> ParseError {
        ParseError::Structural {
            file: self.file.clone(),
            line: self.line,
            state,
            content: self.content.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Block parser state machine.
///
/// Fed one line at a time; each line is classified and dispatched on the
/// pair (current state, line class). Elements are appended to the current
/// slide at the current [`InsertionTarget`].
pub struct BlockBuilder {
    at: Position,
    base_dir: PathBuf,
    default_language: String,
    counters: Counters,
    state: ParserState,
    chapters: Vec<Chapter>,
    target: InsertionTarget,
    list: Option<ListCursor>,
    /// The block element lines are currently appended to.
    open: Option<ElementId>,
    table_aligned: bool,
    /// The previous line was blank inside a list.
    blank_in_list: bool,
    uml_count: usize,
    comments: Vec<String>,
}

impl BlockBuilder {
    pub fn new(
        file: impl Into<String>,
        base_dir: &Path,
        default_language: impl Into<String>,
        counters: Counters,
    ) -> Self {
        Self {
            at: Position {
                file: file.into(),
                ..Position::default()
            },
            base_dir: base_dir.to_path_buf(),
            default_language: default_language.into(),
            counters,
            state: ParserState::Normal,
            chapters: vec![],
            target: InsertionTarget::Body,
            list: None,
            open: None,
            table_aligned: false,
            blank_in_list: false,
            uml_count: 0,
            comments: vec![],
        }
    }

    /// Processes the next line. `rest` holds the lines after it, for the one
    /// lookahead the grammar needs.
    pub fn push(&mut self, line: &str, rest: &[String]) -> Result<(), ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        self.at.line += 1;
        self.at.content = line.to_string();
        let after_blank = std::mem::take(&mut self.blank_in_list);

        if self.state.is_raw() {
            self.consume_raw(line);
            return Ok(());
        }

        if self.state == ParserState::Code {
            if is_blank(line) {
                if code_continues(rest) {
                    self.append_raw("");
                    return Ok(());
                }
            } else if let Some(code) = IndentedCode::parse(line) {
                self.append_raw(code);
                return Ok(());
            }
            self.close_block();
        }

        if self.state == ParserState::MatchingQuestion {
            if let Some((left, right)) = MatchingEntry::parse(line) {
                self.matching_entry(left, right);
                return Ok(());
            }
            self.close_block();
        }

        if let Some(level) = self.state.list_level() {
            let starts_code = after_blank && IndentedCode::parse(line).is_some();
            if !starts_code && is_list_continuation(line, level) {
                self.continue_list_item(line.trim());
                return Ok(());
            }
            self.blank_in_list = is_blank(line);
        }

        let class = LineClassifier.classify(line);
        if !self.continues(&class) {
            self.close_block();
        }
        self.dispatch(class)
    }

    /// Ends the file. Raw blocks still open at the end keep what they have.
    pub fn finish(mut self) -> BuildOutput {
        if self.state.is_raw() {
            log::warn!(
                "{}: {} block not closed before end of file",
                self.at.file,
                self.state
            );
        }
        self.close_block();
        BuildOutput {
            chapters: self.chapters,
            comments: self.comments,
            counters: self.counters,
        }
    }

    /// Whether the line carries on the current block instead of ending it.
    fn continues(&self, class: &LineClass<'_>) -> bool {
        match (self.state, class) {
            (ParserState::Table, LineClass::Table(_)) => true,
            (state, LineClass::ListItem(_) | LineClass::Blank) if state.is_list() => true,
            (ParserState::Quote, LineClass::Quote(QuoteLine::Source(_))) => true,
            (state, LineClass::Quote(QuoteLine::Content(kind, _))) => state == quote_state(*kind),
            _ => false,
        }
    }

    fn dispatch(&mut self, class: LineClass<'_>) -> Result<(), ParseError> {
        match class {
            LineClass::Blank => Ok(()),
            LineClass::Include(include) => self.include(include),
            LineClass::Choice(choice) => self.choice(choice),
            LineClass::Separator => self.toggle_comment(),
            LineClass::VerticalSpace => self.push_element(Element::VerticalSpace).map(drop),
            LineClass::Chapter(title) => {
                self.open_chapter(title);
                Ok(())
            }
            LineClass::Slide { title, skip } => self.open_slide(title, skip),
            LineClass::FenceStart(fence) => self.open_fence(fence),
            LineClass::ScriptStart => {
                self.open_block(Element::Script(vec![]), ParserState::Script)
            }
            LineClass::EquationStart => {
                self.open_block(Element::Equation(Equation::default()), ParserState::Equation)
            }
            LineClass::UmlStart {
                width_slide,
                width_plain,
            } => self.open_uml(width_slide, width_plain),
            LineClass::Directive(directive) => self.directive(directive),
            LineClass::ListItem(item) => self.list_item(item),
            LineClass::IndentedCode(code) => {
                let mut source = Source::new(self.default_language.clone());
                source.lines.push(code.to_string());
                self.open_block(Element::Source(source), ParserState::Code)
            }
            LineClass::Quote(quote) => self.quote(quote),
            LineClass::Table(table) => self.table(table),
            LineClass::Image(image) => self.push_element(Element::Image(image)).map(drop),
            LineClass::FootnoteDef { key, text } => self.footnote(key, text),
            LineClass::LinkDef(link) => {
                let state = self.state;
                match self.chapters.last_mut() {
                    Some(chapter) => {
                        chapter.links.push(link);
                        Ok(())
                    }
                    None => Err(self.at.structural(state, "link definition before the first chapter")),
                }
            }
            LineClass::SubHeading { level, title } => self
                .push_element(Element::Heading(Heading {
                    level,
                    title: RichText::new(title),
                }))
                .map(drop),
            LineClass::LineAction(action) => {
                self.push_element(Element::LineAction(action)).map(drop)
            }
            LineClass::Html(html) => self.push_element(Element::Html(html.to_string())).map(drop),
            LineClass::Text(text) => self.push_element(Element::Text(RichText::new(text))).map(drop),
            LineClass::Unknown => Err(self.at.syntax(self.state, "unrecognised line")),
        }
    }

    fn set_state(&mut self, next: ParserState) {
        if self.state != next {
            log::debug!(
                "{}:{}: {} -> {}",
                self.at.file,
                self.at.line,
                self.state,
                next
            );
            self.state = next;
        }
    }

    /// Leaves the current block and returns to NORMAL.
    fn close_block(&mut self) {
        self.set_state(ParserState::Normal);
        self.list = None;
        self.open = None;
        self.table_aligned = false;
    }

    fn slide_mut(&mut self) -> Option<&mut Slide> {
        self.chapters.last_mut()?.slides.last_mut()
    }

    fn require_slide(&mut self) -> Result<&mut Slide, ParseError> {
        let state = self.state;
        match self.chapters.last_mut().and_then(|c| c.slides.last_mut()) {
            Some(slide) => Ok(slide),
            None => Err(self.at.structural(state, "content before the first slide")),
        }
    }

    /// Appends an element at the insertion target.
    fn push_element(&mut self, element: Element) -> Result<ElementId, ParseError> {
        let target = self.target;
        let slide = self.require_slide()?;
        Ok(target.push(slide, element))
    }

    /// Appends a block element and makes it the one lines go to.
    fn open_block(&mut self, element: Element, state: ParserState) -> Result<(), ParseError> {
        let id = self.push_element(element)?;
        self.open = Some(id);
        self.set_state(state);
        Ok(())
    }

    fn open_element_mut(&mut self) -> Option<&mut Element> {
        let id = self.open?;
        Some(self.slide_mut()?.element_mut(id))
    }

    fn open_chapter(&mut self, title: &str) {
        self.target = InsertionTarget::Body;
        self.counters.chapter += 1;
        let id = format!("chap_{}", self.counters.chapter);
        log::debug!("{}:{}: chapter {id} {title:?}", self.at.file, self.at.line);
        self.chapters.push(Chapter::new(title, id));
    }

    fn open_slide(&mut self, title: &str, skip: bool) -> Result<(), ParseError> {
        let state = self.state;
        let Some(chapter) = self.chapters.last_mut() else {
            return Err(self.at.structural(state, "slide before the first chapter"));
        };
        self.counters.slide += 1;
        let id = format!("{}_{}", chapter.id, chapter.slides.len() + 1);
        chapter
            .slides
            .push(Slide::new(title, id, self.counters.slide, skip));
        self.target = InsertionTarget::Body;
        self.uml_count = 0;
        Ok(())
    }

    fn toggle_comment(&mut self) -> Result<(), ParseError> {
        match self.target {
            InsertionTarget::Body => {
                let slide = self.require_slide()?;
                let id = slide.push_root(Element::Comment(Comment::default()));
                self.target = InsertionTarget::Comment(id);
            }
            InsertionTarget::Comment(_) => self.target = InsertionTarget::Body,
        }
        Ok(())
    }

    fn open_fence(&mut self, fence: Fence) -> Result<(), ParseError> {
        let mut source = Source::new(
            fence
                .language
                .unwrap_or_else(|| self.default_language.clone()),
        );
        source.caption = fence.caption;
        source.order = fence.order;
        self.reserve_order(fence.order);
        self.open_block(Element::Source(source), ParserState::CodeFenced)
    }

    /// Step-reveal frames take slide numbers of their own.
    fn reserve_order(&mut self, order: Option<u32>) {
        if let Some(order) = order {
            self.counters.slide += order as usize;
        }
    }

    fn open_uml(
        &mut self,
        width_slide: Option<String>,
        width_plain: Option<String>,
    ) -> Result<(), ParseError> {
        let slide_id = self.require_slide()?.id.clone();
        self.uml_count += 1;
        let uml = Uml {
            name: format!("{slide_id}_uml_{}", self.uml_count),
            lines: vec![],
            width_slide: width_slide.unwrap_or_else(|| DEFAULT_UML_WIDTH.to_string()),
            width_plain: width_plain.unwrap_or_else(|| DEFAULT_UML_WIDTH.to_string()),
        };
        self.open_block(Element::Uml(uml), ParserState::Uml)
    }

    fn consume_raw(&mut self, line: &str) {
        let closes = match self.state {
            ParserState::CodeFenced => CodeFence::closes(line),
            ParserState::Script => ScriptFence::closes(line),
            ParserState::Equation => EquationFence::closes(line),
            ParserState::Uml => UmlFence::closes(line),
            _ => false,
        };
        if closes {
            self.close_block();
        } else {
            self.append_raw(line);
        }
    }

    /// Appends a verbatim line to the open code, script, equation or UML block.
    fn append_raw(&mut self, line: &str) {
        match self.open_element_mut() {
            Some(Element::Source(source)) => source.lines.push(line.to_string()),
            Some(Element::Script(lines)) => lines.push(line.to_string()),
            Some(Element::Equation(equation)) => equation.lines.push(line.to_string()),
            Some(Element::Uml(uml)) => uml.lines.push(line.to_string()),
            _ => {}
        }
    }

    fn include(&mut self, include: Include) -> Result<(), ParseError> {
        let path = self.base_dir.join(&include.path);
        let lines = io::read_lines(&path).map_err(|err| match err {
            IoError::NotFound(path) => ParseError::MissingFile {
                file: self.at.file.clone(),
                line: self.at.line,
                path,
            },
            IoError::Io(source) => ParseError::Io {
                path: path.clone(),
                source,
            },
        })?;
        log::debug!(
            "{}:{}: included {} lines from {}",
            self.at.file,
            self.at.line,
            lines.len(),
            path.display()
        );

        let mut source = Source::new(
            include
                .language
                .unwrap_or_else(|| self.default_language.clone()),
        );
        source.order = include.order;
        source.lines = lines;
        self.reserve_order(include.order);
        self.push_element(Element::Source(source)).map(drop)
    }

    fn choice(&mut self, choice: Choice<'_>) -> Result<(), ParseError> {
        let target = self.target;
        let slide = self.require_slide()?;
        let question = MultipleChoice {
            correct: choice.correct,
            text: RichText::new(choice.text),
        };
        if let Some(id) = target.last(slide) {
            if let Element::MultipleChoice(group) = slide.element_mut(id) {
                group.inline |= choice.inline;
                group.questions.push(question);
                return Ok(());
            }
        }
        target.push(
            slide,
            Element::MultipleChoice(MultipleChoiceQuestions {
                inline: choice.inline,
                questions: vec![question],
            }),
        );
        Ok(())
    }

    fn directive(&mut self, directive: Directive) -> Result<(), ParseError> {
        match directive {
            Directive::Spacing(spacing) => {
                self.require_slide()?.spacing = Some(spacing);
                Ok(())
            }
            Directive::Input { answer } => self
                .push_element(Element::InputQuestion(InputQuestion { answer }))
                .map(drop),
            Directive::Shuffle { kind } => self.open_block(
                Element::Matching(MatchingQuestions {
                    kind,
                    pairs: vec![],
                }),
                ParserState::MatchingQuestion,
            ),
            Directive::Comment(text) => {
                self.comments.push(text);
                Ok(())
            }
        }
    }

    fn matching_entry(&mut self, left: &str, right: &str) {
        if let Some(Element::Matching(group)) = self.open_element_mut() {
            group.pairs.push(MatchingPair {
                left: RichText::new(left),
                right: RichText::new(right),
            });
        }
    }

    fn list_item(&mut self, item: ListLine<'_>) -> Result<(), ParseError> {
        let state = self.state;
        let target = self.target;
        let cursor = self.list;
        let Some(slide) = self.chapters.last_mut().and_then(|c| c.slides.last_mut()) else {
            return Err(self.at.structural(state, "content before the first slide"));
        };

        let id = match cursor {
            None if item.level != 1 => {
                return Err(self.at.syntax(state, "list must start at level 1"));
            }
            None => target.push(slide, Element::List(List::new(item.kind, 1, None))),
            Some(cursor) if item.level > cursor.level + 1 => {
                return Err(self.at.syntax(state, "list level skipped"));
            }
            Some(cursor) if item.level == cursor.level + 1 => {
                let child = slide.alloc(Element::List(List::new(
                    item.kind,
                    item.level,
                    Some(cursor.id),
                )));
                attach_to_last_item(slide, cursor.id, child);
                child
            }
            Some(cursor) => {
                let Some(mut id) = ascend(slide, cursor.id, item.level) else {
                    return Err(self.at.syntax(state, "no open list at this level"));
                };
                let (same_shape, parent) = match slide.element(id) {
                    Element::List(list) => (list.kind.same_shape(item.kind), list.parent),
                    _ => (false, None),
                };
                if !same_shape {
                    let sibling =
                        slide.alloc(Element::List(List::new(item.kind, item.level, parent)));
                    match parent {
                        Some(parent) => attach_to_last_item(slide, parent, sibling),
                        None => place_at(target, slide, sibling),
                    }
                    id = sibling;
                }
                id
            }
        };

        if let Element::List(list) = slide.element_mut(id) {
            list.items.push(ListItem::new(item.text));
        }
        self.list = Some(ListCursor {
            id,
            level: item.level,
        });
        self.set_state(ParserState::list(item.kind, item.level));
        Ok(())
    }

    fn continue_list_item(&mut self, text: &str) {
        let Some(cursor) = self.list else { return };
        let Some(slide) = self.slide_mut() else { return };
        if let Element::List(list) = slide.element_mut(cursor.id) {
            if let Some(last) = list.items.last_mut() {
                last.text.push_line(text);
            }
        }
    }

    fn quote(&mut self, quote: QuoteLine<'_>) -> Result<(), ParseError> {
        match quote {
            QuoteLine::Content(kind, text) => {
                if self.state == quote_state(kind) {
                    match self.open_element_mut() {
                        Some(Element::Quote(q)) => q.content.push_line(text),
                        Some(Element::Callout(c)) => c.content.push_line(text),
                        _ => {}
                    }
                    return Ok(());
                }
                let element = match kind {
                    QuoteKind::Quote => Element::Quote(Quote {
                        content: RichText::new(text),
                        source: None,
                    }),
                    QuoteKind::Callout(kind) => Element::Callout(Callout {
                        kind,
                        content: RichText::new(text),
                    }),
                };
                self.open_block(element, quote_state(kind))
            }
            QuoteLine::Source(text) => {
                if self.state == ParserState::Quote {
                    if let Some(Element::Quote(q)) = self.open_element_mut() {
                        match &mut q.source {
                            Some(source) => source.push_line(text),
                            None => q.source = Some(RichText::new(text)),
                        }
                    }
                    return Ok(());
                }
                self.open_block(
                    Element::Quote(Quote {
                        content: RichText::default(),
                        source: Some(RichText::new(text)),
                    }),
                    ParserState::Quote,
                )
            }
        }
    }

    fn table(&mut self, line: TableLine) -> Result<(), ParseError> {
        match line {
            TableLine::Row(cells) if self.state == ParserState::Table => {
                if let Some(Element::Table(table)) = self.open_element_mut() {
                    table
                        .rows
                        .push(TableRow::Cells(cells.iter().map(|c| RichText::new(c.as_str())).collect()));
                }
                Ok(())
            }
            TableLine::Row(cells) => {
                let table = Table {
                    headers: cells
                        .iter()
                        .map(|c| TableHeader {
                            text: RichText::new(c.as_str()),
                            align: Default::default(),
                        })
                        .collect(),
                    rows: vec![],
                };
                self.open_block(Element::Table(table), ParserState::Table)?;
                self.table_aligned = false;
                Ok(())
            }
            TableLine::Separator(aligns) if self.state == ParserState::Table => {
                let set_alignment = !self.table_aligned;
                if let Some(Element::Table(table)) = self.open_element_mut() {
                    if set_alignment && table.rows.is_empty() {
                        for (header, align) in table.headers.iter_mut().zip(aligns) {
                            header.align = align;
                        }
                    } else {
                        table.rows.push(TableRow::Separator);
                    }
                }
                self.table_aligned = true;
                Ok(())
            }
            TableLine::Separator(_) => Err(self.at.syntax(self.state, "table separator without a table")),
        }
    }

    fn footnote(&mut self, key: &str, text: &str) -> Result<(), ParseError> {
        let slide = self.require_slide()?;
        if slide.footnote(key).is_some() {
            log::warn!("footnote [^{key}] defined twice on slide {}, keeping the first", slide.id);
            return Ok(());
        }
        let number = slide.footnotes.len() + 1;
        slide.footnotes.push(Footnote::new(key, number, text));
        Ok(())
    }
}

fn quote_state(kind: QuoteKind) -> ParserState {
    match kind {
        QuoteKind::Quote => ParserState::Quote,
        QuoteKind::Callout(CalloutKind::Important) => ParserState::Important,
        QuoteKind::Callout(CalloutKind::Question) => ParserState::Question,
        QuoteKind::Callout(CalloutKind::Box) => ParserState::Box,
    }
}

/// A blank line inside indented code belongs to it when more code follows.
fn code_continues(rest: &[String]) -> bool {
    rest.iter()
        .find(|line| !is_blank(line))
        .is_some_and(|line| IndentedCode::parse(line).is_some())
}

/// A non-blank line indented past the bullet that is not itself an item.
fn is_list_continuation(line: &str, level: u8) -> bool {
    !is_blank(line)
        && ListMarker::parse(line).is_none()
        && indent(line) > ListMarker::bullet_indent(level)
}

/// Walks parent links from `id` up to the list at `level`.
fn ascend(slide: &Slide, mut id: ElementId, level: u8) -> Option<ElementId> {
    loop {
        let Element::List(list) = slide.element(id) else {
            return None;
        };
        if list.level <= level {
            return (list.level == level).then_some(id);
        }
        id = list.parent?;
    }
}

fn attach_to_last_item(slide: &mut Slide, list: ElementId, child: ElementId) {
    if let Element::List(list) = slide.element_mut(list) {
        if let Some(item) = list.items.last_mut() {
            item.children.push(child);
        }
    }
}

/// Places an already allocated element at the insertion target.
fn place_at(target: InsertionTarget, slide: &mut Slide, id: ElementId) {
    match target {
        InsertionTarget::Body => slide.body.push(id),
        InsertionTarget::Comment(comment) => {
            if let Element::Comment(Comment { children }) = slide.element_mut(comment) {
                children.push(id);
            }
        }
    }
}
