use crate::models::{Image, LineAction, LinkDefinition};

use super::kinds::{
    ChapterHeading, Choice, ChoiceLine, CodeFence, Directive, EquationFence, Fence,
    FootnoteDefinition, HtmlLine, ImageLine, Include, IncludeSource, IndentedCode,
    LineActionLine, LinkReference, ListLine, ListMarker, QuoteLine, ScriptFence, Separator,
    SlideHeading, SubHeading, TableLine, UmlFence, VerticalSpace, is_blank,
};

/// What a single line looks like, without any knowledge of the parser state.
///
/// The variants are listed in the order the classifier tries them; the first
/// construct that accepts the line wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    Include(Include),
    Choice(Choice<'a>),
    Separator,
    VerticalSpace,
    Chapter(&'a str),
    Slide {
        title: &'a str,
        skip: bool,
    },
    FenceStart(Fence),
    ScriptStart,
    EquationStart,
    UmlStart {
        width_slide: Option<String>,
        width_plain: Option<String>,
    },
    Directive(Directive),
    ListItem(ListLine<'a>),
    IndentedCode(&'a str),
    Quote(QuoteLine<'a>),
    Table(TableLine),
    Image(Image),
    FootnoteDef {
        key: &'a str,
        text: &'a str,
    },
    LinkDef(LinkDefinition),
    SubHeading {
        level: u8,
        title: &'a str,
    },
    LineAction(LineAction),
    Html(&'a str),
    Text(&'a str),
    /// Nothing accepts the line.
    Unknown,
}

/// Classifies individual lines for the block parser.
pub struct LineClassifier;

impl LineClassifier {
    /// Classifies a line into a [`LineClass`]. Never fails: lines nothing
    /// accepts come back as [`LineClass::Unknown`].
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let line = line.trim_end_matches(['\r', '\n']);

        if is_blank(line) {
            return LineClass::Blank;
        }
        if let Some(include) = IncludeSource::parse(line) {
            return LineClass::Include(include);
        }
        if let Some(choice) = ChoiceLine::parse(line) {
            return LineClass::Choice(choice);
        }
        if Separator::matches(line) {
            return LineClass::Separator;
        }
        if VerticalSpace::matches(line) {
            return LineClass::VerticalSpace;
        }
        if let Some(title) = ChapterHeading::parse(line) {
            return LineClass::Chapter(title);
        }
        if let Some((title, skip)) = SlideHeading::parse(line) {
            return LineClass::Slide { title, skip };
        }
        if let Some(fence) = CodeFence::open(line) {
            return LineClass::FenceStart(fence);
        }
        if ScriptFence::opens(line) {
            return LineClass::ScriptStart;
        }
        if EquationFence::opens(line) {
            return LineClass::EquationStart;
        }
        if let Some((width_slide, width_plain)) = UmlFence::open(line) {
            return LineClass::UmlStart {
                width_slide,
                width_plain,
            };
        }
        if let Some(directive) = Directive::parse(line) {
            return LineClass::Directive(directive);
        }
        if let Some(item) = ListMarker::parse(line) {
            return LineClass::ListItem(item);
        }
        if let Some(code) = IndentedCode::parse(line) {
            return LineClass::IndentedCode(code);
        }
        if let Some(quote) = QuoteLine::parse(line) {
            return LineClass::Quote(quote);
        }
        if let Some(table) = TableLine::parse(line) {
            return LineClass::Table(table);
        }
        if let Some(image) = ImageLine::parse(line) {
            return LineClass::Image(image);
        }
        if let Some((key, text)) = FootnoteDefinition::parse(line) {
            return LineClass::FootnoteDef { key, text };
        }
        if let Some(link) = LinkReference::parse(line) {
            return LineClass::LinkDef(link);
        }
        if let Some((level, title)) = SubHeading::parse(line) {
            return LineClass::SubHeading { level, title };
        }
        if let Some(action) = LineActionLine::parse(line) {
            return LineClass::LineAction(action);
        }
        if HtmlLine::matches(line) {
            return LineClass::Html(line);
        }
        match line.chars().next() {
            Some(c) if !c.is_whitespace() => LineClass::Text(line.trim_end()),
            _ => LineClass::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListKind;
    use rstest::rstest;

    fn classify(line: &str) -> LineClass<'_> {
        LineClassifier.classify(line)
    }

    #[rstest]
    #[case("# Chapter One", LineClass::Chapter("Chapter One"))]
    #[case("## Slide A", LineClass::Slide { title: "Slide A", skip: false })]
    #[case("## Hidden --skip--", LineClass::Slide { title: "Hidden", skip: true })]
    #[case("---", LineClass::Separator)]
    #[case("<br>", LineClass::VerticalSpace)]
    #[case("<script>", LineClass::ScriptStart)]
    #[case(r"\[", LineClass::EquationStart)]
    #[case("", LineClass::Blank)]
    #[case("   ", LineClass::Blank)]
    #[case("        ", LineClass::Blank)]
    #[case("Some text", LineClass::Text("Some text"))]
    #[case("  stray indent", LineClass::Unknown)]
    #[case("\tTabbed", LineClass::Unknown)]
    fn simple_lines(#[case] line: &str, #[case] expected: LineClass<'static>) {
        assert_eq!(classify(line), expected);
    }

    #[test]
    fn crlf_is_ignored() {
        assert_eq!(classify("# Title\r"), LineClass::Chapter("Title"));
    }

    #[test]
    fn list_items_win_over_indented_code() {
        assert_eq!(
            classify("    * nested"),
            LineClass::ListItem(ListLine {
                kind: ListKind::Unordered,
                level: 2,
                text: "nested"
            })
        );
        assert_eq!(classify("    return x;"), LineClass::IndentedCode("return x;"));
    }

    #[test]
    fn choice_wins_over_list_item() {
        assert!(matches!(
            classify("  * [X] right"),
            LineClass::Choice(Choice { correct: true, .. })
        ));
    }

    #[test]
    fn directives_before_html() {
        assert_eq!(
            classify("<!-- Spacing: 2 -->"),
            LineClass::Directive(Directive::Spacing(2))
        );
        assert_eq!(classify("<div>"), LineClass::Html("<div>"));
    }

    #[test]
    fn footnote_and_link_definitions() {
        assert_eq!(
            classify("[^1]: Note text"),
            LineClass::FootnoteDef {
                key: "1",
                text: "Note text"
            }
        );
        assert!(matches!(
            classify("[rust]: https://rust-lang.org"),
            LineClass::LinkDef(_)
        ));
    }

    #[test]
    fn sub_headings_and_actions() {
        assert_eq!(
            classify("#### Detail"),
            LineClass::SubHeading {
                level: 4,
                title: "Detail"
            }
        );
        assert_eq!(
            classify("((Live-Preview))"),
            LineClass::LineAction(LineAction::LivePreview)
        );
    }

    #[test]
    fn emphasis_at_line_start_is_text() {
        assert_eq!(classify("*not a list*"), LineClass::Text("*not a list*"));
    }
}
