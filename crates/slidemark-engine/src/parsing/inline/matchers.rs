use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::Node;

use super::{
    InlineContext,
    cursor::Cursor,
    kinds::{
        Citation, CodeSpan, DelimiterRun, Emphasis, FootnoteMarker, Formula, Link, Script, Width,
        delimiter::is_protected,
    },
};

/// A recognised span: the bytes it covers and the node replacing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanMatch {
    pub range: Range<usize>,
    pub node: Node,
}

/// Span matchers, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Code,
    Html,
    Link,
    Quoted,
    StrongStar,
    StrongUnderscore,
    EmphasisStar,
    EmphasisUnderscore,
    Formula,
    SubSuperscript,
    Deleted,
    Underline,
    Citation,
    LineBreak,
    Footnote,
}

impl Matcher {
    pub const ALL: [Matcher; 15] = [
        Matcher::Code,
        Matcher::Html,
        Matcher::Link,
        Matcher::Quoted,
        Matcher::StrongStar,
        Matcher::StrongUnderscore,
        Matcher::EmphasisStar,
        Matcher::EmphasisUnderscore,
        Matcher::Formula,
        Matcher::SubSuperscript,
        Matcher::Deleted,
        Matcher::Underline,
        Matcher::Citation,
        Matcher::LineBreak,
        Matcher::Footnote,
    ];

    /// All non-overlapping matches in `s`, left to right. Delimiters inside
    /// `protected` ranges are not considered.
    pub fn find_all(
        self,
        s: &str,
        protected: &[Range<usize>],
        ctx: &InlineContext<'_>,
    ) -> Vec<SpanMatch> {
        match self {
            Matcher::Code => code_spans(s),
            Matcher::Html => html_pairs(s, protected),
            Matcher::Link => links(s, protected),
            Matcher::Quoted => {
                let mut guarded = protected.to_vec();
                guarded.extend(tag_spans(s));
                delimited(s, Emphasis::QUOTE, Width::Single, &guarded, Node::Quoted)
            }
            Matcher::StrongStar => delimited(s, Emphasis::STAR, Width::Double, protected, Node::Strong),
            Matcher::StrongUnderscore => {
                delimited(s, Emphasis::UNDERSCORE, Width::Double, protected, Node::Strong)
            }
            Matcher::EmphasisStar => {
                delimited(s, Emphasis::STAR, Width::Single, protected, Node::Emphasis)
            }
            Matcher::EmphasisUnderscore => {
                delimited(s, Emphasis::UNDERSCORE, Width::Single, protected, Node::Emphasis)
            }
            Matcher::Formula => formulas(s, protected),
            Matcher::SubSuperscript => scripts(s, protected),
            Matcher::Deleted => delimited(s, Emphasis::TILDE, Width::Double, protected, Node::Deleted),
            Matcher::Underline => {
                delimited(s, Emphasis::TILDE, Width::Single, protected, Node::Underline)
            }
            Matcher::Citation => citations(s, protected),
            Matcher::LineBreak => line_breaks(s, protected),
            Matcher::Footnote => footnotes(s, protected, ctx),
        }
    }
}

/// Text still to be parsed, as children of a new span.
fn unparsed(text: &str) -> Vec<Node> {
    if text.is_empty() {
        vec![]
    } else {
        vec![Node::Unparsed(text.to_string())]
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid inline regex"))
}

/// Backtick code spans. A run of n backticks is closed by the next run of
/// exactly n; an unclosed run is literal text.
fn code_spans(s: &str) -> Vec<SpanMatch> {
    let mut out = vec![];
    let mut cur = Cursor::new(s);
    while !cur.eof() {
        if cur.peek() != Some(CodeSpan::TICK) {
            cur.bump();
            continue;
        }
        let start = cur.i;
        let n = cur.run_len(CodeSpan::TICK);
        cur.bump_n(n);

        let mut probe = cur.clone();
        while !probe.eof() {
            if probe.peek() == Some(CodeSpan::TICK) {
                let m = probe.run_len(CodeSpan::TICK);
                if m == n {
                    break;
                }
                probe.bump_n(m);
            } else {
                probe.bump();
            }
        }
        if probe.eof() {
            continue;
        }

        let inner = &s[cur.i..probe.i];
        out.push(SpanMatch {
            range: start..probe.i + n,
            node: Node::Code(CodeSpan::strip_padding(inner).to_string()),
        });
        cur = probe;
        cur.bump_n(n);
    }
    out
}

/// `<tag ...>…</tag>` passed through verbatim. Opens of the same tag name
/// nest, so the pair ends at the close tag that balances the first open.
fn html_pairs(s: &str, protected: &[Range<usize>]) -> Vec<SpanMatch> {
    let open = open_tag();

    let mut out = vec![];
    let mut from = 0;
    while let Some(caps) = open.captures_at(s, from) {
        let (Some(m), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        from = m.end();
        if is_protected(protected, m.start()) || tag.as_str().eq_ignore_ascii_case("br") {
            continue;
        }
        if let Some(end) = balancing_close(s, m.end(), tag.as_str(), protected) {
            out.push(SpanMatch {
                range: m.start()..end,
                node: Node::Html(s[m.start()..end].to_string()),
            });
            from = end;
        }
    }
    out
}

fn open_tag() -> &'static Regex {
    static OPEN: OnceLock<Regex> = OnceLock::new();
    regex(&OPEN, r"<([A-Za-z][A-Za-z0-9]*)(?:\s[^<>]*)?>")
}

/// End of the `</name>` that brings the nesting depth back to zero.
fn balancing_close(s: &str, from: usize, name: &str, protected: &[Range<usize>]) -> Option<usize> {
    let close = format!("</{name}>");
    let mut depth = 1usize;
    let mut cur = Cursor::at(s, from);
    while let Some(at) = cur.find("<") {
        if is_protected(protected, at) {
            cur.bump();
            continue;
        }
        if s[at..].starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return Some(at + close.len());
            }
            cur.bump_n(close.len());
            continue;
        }
        let nested = open_tag()
            .captures_at(s, at)
            .filter(|c| c.get(0).is_some_and(|g| g.start() == at))
            .and_then(|c| Some((c.get(0)?.end(), c.get(1)?.as_str() == name)));
        match nested {
            Some((end, true)) => {
                depth += 1;
                cur = Cursor::at(s, end);
            }
            _ => {
                cur.bump();
            }
        }
    }
    None
}

/// Every `<tag ...>` or `</tag>`, paired or not.
fn tag_spans(s: &str) -> Vec<Range<usize>> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    regex(&TAG, r"</?[A-Za-z][A-Za-z0-9]*(?:\s[^<>]*)?/?>")
        .find_iter(s)
        .map(|m| m.range())
        .collect()
}

fn links(s: &str, protected: &[Range<usize>]) -> Vec<SpanMatch> {
    let bytes = s.as_bytes();
    let mut out = vec![];
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == Link::OPEN && !is_protected(protected, i) {
            if let Some(found) = link_at(s, i, protected) {
                i = found.range.end;
                out.push(found);
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Parses `[text](destination "title")` starting at the `[` at `start`.
fn link_at(s: &str, start: usize, protected: &[Range<usize>]) -> Option<SpanMatch> {
    let bytes = s.as_bytes();

    let mut depth = 0usize;
    let mut j = start;
    let text_end = loop {
        let b = *bytes.get(j)?;
        if !is_protected(protected, j) {
            match b {
                Link::ESCAPE => j += 1,
                Link::OPEN => depth += 1,
                Link::CLOSE => {
                    depth -= 1;
                    if depth == 0 {
                        break j;
                    }
                }
                _ => {}
            }
        }
        j += 1;
    };

    let mut cur = Cursor::at(s, text_end + 1);
    if cur.bump()? != Link::DEST_OPEN {
        return None;
    }
    cur.skip_spaces();

    let href = if cur.peek() == Some(Link::ANGLE_OPEN) {
        cur.bump();
        let href_start = cur.i;
        while cur.peek()? != Link::ANGLE_CLOSE {
            if cur.peek() == Some(b'\n') {
                return None;
            }
            cur.bump();
        }
        let href = s[href_start..cur.i].to_string();
        cur.bump();
        href
    } else {
        let href_start = cur.i;
        let mut parens = 0usize;
        while let Some(b) = cur.peek() {
            match b {
                Link::ESCAPE => cur.bump_n(1),
                b if b.is_ascii_whitespace() => break,
                Link::DEST_OPEN => parens += 1,
                Link::DEST_CLOSE if parens == 0 => break,
                Link::DEST_CLOSE => parens -= 1,
                _ => {}
            }
            cur.bump();
        }
        Link::unescape(s.get(href_start..cur.i.min(s.len()))?)
    };
    cur.skip_spaces();

    let title = if cur.peek() == Some(Link::TITLE) {
        cur.bump();
        let title_start = cur.i;
        cur.find("\"")?;
        let title = s[title_start..cur.i].to_string();
        cur.bump();
        cur.skip_spaces();
        Some(title)
    } else {
        None
    };

    if cur.bump()? != Link::DEST_CLOSE {
        return None;
    }
    Some(SpanMatch {
        range: start..cur.i,
        node: Node::Link {
            href,
            title,
            children: unparsed(&s[start + 1..text_end]),
        },
    })
}

/// Spans built from paired delimiter runs.
fn delimited(
    s: &str,
    marker: u8,
    width: Width,
    protected: &[Range<usize>],
    make: fn(Vec<Node>) -> Node,
) -> Vec<SpanMatch> {
    let runs = DelimiterRun::scan(s, marker, protected);
    DelimiterRun::pair(&runs, width)
        .into_iter()
        .filter(|(open, close)| open.end < close.start)
        .map(|(open, close)| SpanMatch {
            node: make(unparsed(&s[open.end..close.start])),
            range: open.start..close.end,
        })
        .collect()
}

fn formulas(s: &str, protected: &[Range<usize>]) -> Vec<SpanMatch> {
    let mut out = vec![];
    let mut cur = Cursor::new(s);
    while let Some(start) = cur.find(Formula::OPEN) {
        cur.bump_n(Formula::OPEN.len());
        if is_protected(protected, start) {
            continue;
        }
        let inner_start = cur.i;
        let mut close = cur.clone();
        while let Some(at) = close.find(Formula::CLOSE) {
            if !is_protected(protected, at) {
                out.push(SpanMatch {
                    range: start..at + Formula::CLOSE.len(),
                    node: Node::Formula(s[inner_start..at].to_string()),
                });
                cur = Cursor::at(s, at + Formula::CLOSE.len());
                break;
            }
            close.bump_n(Formula::CLOSE.len());
        }
    }
    out
}

/// `x_1`, `x^2`: a short alphanumeric base and script between boundaries.
/// Subscripts also need a digit script or a one-letter base, so
/// identifiers like `max_len` stay text. The match covers the marker and
/// the script; the base stays text.
fn scripts(s: &str, protected: &[Range<usize>]) -> Vec<SpanMatch> {
    let bytes = s.as_bytes();
    let mut out = vec![];
    let mut i = 0;
    while i < bytes.len() {
        let marker = bytes[i];
        if (marker != Script::SUB && marker != Script::SUP) || is_protected(protected, i) {
            i += 1;
            continue;
        }

        let base_start = bytes[..i]
            .iter()
            .rposition(|b| !b.is_ascii_alphanumeric())
            .map_or(0, |p| p + 1);
        let script_end = bytes[i + 1..]
            .iter()
            .position(|b| !b.is_ascii_alphanumeric())
            .map_or(bytes.len(), |p| i + 1 + p);
        let base_len = i - base_start;
        let script_len = script_end - i - 1;

        let base = &s[base_start..i];
        let script = &s[i + 1..script_end];
        let before_ok = s[..base_start].chars().next_back().is_none_or(Script::is_boundary);
        let shaped = marker == Script::SUP || Script::is_subscript(base, script);

        if (1..=Script::MAX_BASE).contains(&base_len)
            && (1..=Script::MAX_SCRIPT).contains(&script_len)
            && shaped
            && before_ok
            && Script::ends_script(marker, script, &s[script_end..])
            && !is_protected(protected, base_start)
        {
            let script = vec![Node::Text(script.to_string())];
            out.push(SpanMatch {
                range: i..script_end,
                node: if marker == Script::SUB {
                    Node::Subscript(script)
                } else {
                    Node::Superscript(script)
                },
            });
            i = script_end;
            continue;
        }
        i += 1;
    }
    out
}

fn citations(s: &str, protected: &[Range<usize>]) -> Vec<SpanMatch> {
    let mut out = vec![];
    let mut cur = Cursor::new(s);
    while let Some(start) = cur.find(Citation::OPEN) {
        cur.bump_n(Citation::OPEN.len());
        if is_protected(protected, start) {
            continue;
        }
        let inner_start = cur.i;
        let mut close = cur.clone();
        let Some(at) = close.find(Citation::CLOSE) else {
            break;
        };
        let key = s[inner_start..at].trim();
        if key.is_empty() || key.contains(['[', ']']) || is_protected(protected, at) {
            continue;
        }
        out.push(SpanMatch {
            range: start..at + Citation::CLOSE.len(),
            node: Node::Citation(key.to_string()),
        });
        cur = Cursor::at(s, at + Citation::CLOSE.len());
    }
    out
}

fn line_breaks(s: &str, protected: &[Range<usize>]) -> Vec<SpanMatch> {
    static BR: OnceLock<Regex> = OnceLock::new();
    regex(&BR, r"<br\s*/?>")
        .find_iter(s)
        .filter(|m| !is_protected(protected, m.start()))
        .map(|m| SpanMatch {
            range: m.range(),
            node: Node::LineBreak,
        })
        .collect()
}

/// `[^key]` for keys defined on the slide. Unknown keys stay text.
fn footnotes(s: &str, protected: &[Range<usize>], ctx: &InlineContext<'_>) -> Vec<SpanMatch> {
    let mut out = vec![];
    let mut cur = Cursor::new(s);
    while let Some(start) = cur.find(FootnoteMarker::OPEN) {
        cur.bump_n(FootnoteMarker::OPEN.len());
        if is_protected(protected, start) {
            continue;
        }
        let key_start = cur.i;
        let mut close = cur.clone();
        let Some(at) = close.find(FootnoteMarker::CLOSE) else {
            break;
        };
        let Some(footnote) = ctx.footnote(&s[key_start..at]) else {
            continue;
        };
        out.push(SpanMatch {
            range: start..at + FootnoteMarker::CLOSE.len(),
            node: Node::FootnoteRef {
                key: footnote.key.clone(),
                number: footnote.number,
                children: footnote.text.render_nodes().into_owned(),
            },
        });
        cur = Cursor::at(s, at + FootnoteMarker::CLOSE.len());
    }
    out
}
