use crate::models::Node;

use super::{
    InlineContext,
    matchers::{Matcher, SpanMatch},
};

/// Parses one content string into an inline node tree.
///
/// The content starts as a single unparsed run; [`resolve_nodes`] then
/// splits runs until no matcher fires.
pub fn parse_inline(content: &str, ctx: &InlineContext<'_>) -> Vec<Node> {
    let mut nodes = if content.is_empty() {
        vec![]
    } else {
        vec![Node::Unparsed(content.to_string())]
    };
    resolve_nodes(&mut nodes, ctx);
    nodes
}

/// Resolves every unparsed run in `nodes`, layer by layer, then merges
/// adjacent text. A tree without unparsed runs is left as it is.
pub fn resolve_nodes(nodes: &mut Vec<Node>, ctx: &InlineContext<'_>) {
    let mut passes = 0;
    while pass(nodes, ctx) {
        passes += 1;
    }
    if passes > 0 {
        log::trace!("inline tree resolved in {passes} passes");
    }
    merge_text(nodes);
}

/// One pass over the tree. Returns whether any unparsed run was visited.
fn pass(nodes: &mut Vec<Node>, ctx: &InlineContext<'_>) -> bool {
    let mut changed = false;
    let mut out = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        match node {
            Node::Unparsed(text) => {
                changed = true;
                split(&text, ctx, &mut out);
            }
            _ => {
                if let Some(children) = node.children_mut() {
                    changed |= pass(children, ctx);
                }
                out.push(node);
            }
        }
    }
    *nodes = out;
    changed
}

/// Replaces one unparsed run by the text before its first span, the span,
/// and the text after it. Runs without any span become text.
fn split(text: &str, ctx: &InlineContext<'_>, out: &mut Vec<Node>) {
    let Some(SpanMatch { range, node }) = first_match(text, ctx) else {
        out.push(Node::Text(text.to_string()));
        return;
    };
    if range.start > 0 {
        out.push(Node::Unparsed(text[..range.start].to_string()));
    }
    out.push(node);
    if range.end < text.len() {
        out.push(Node::Unparsed(text[range.end..].to_string()));
    }
}

/// The leftmost span over all matchers; ties go to the higher priority.
///
/// Every match of a matcher protects its range from the matchers after it,
/// so lower-priority delimiters never straddle a higher-priority span.
fn first_match(text: &str, ctx: &InlineContext<'_>) -> Option<SpanMatch> {
    let mut protected = vec![];
    let mut best: Option<SpanMatch> = None;
    for matcher in Matcher::ALL {
        let mut found = matcher.find_all(text, &protected, ctx);
        protected.extend(found.iter().map(|m| m.range.clone()));
        if found.is_empty() {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|b| found[0].range.start < b.range.start)
        {
            best = Some(found.swap_remove(0));
        }
    }
    best
}

/// Joins adjacent text nodes and drops empty ones, recursively.
fn merge_text(nodes: &mut Vec<Node>) {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        if let Some(children) = node.children_mut() {
            merge_text(children);
        }
        match node {
            Node::Text(t) if t.is_empty() => {}
            Node::Text(t) => match out.last_mut() {
                Some(Node::Text(prev)) => prev.push_str(&t),
                _ => out.push(Node::Text(t)),
            },
            node => out.push(node),
        }
    }
    *nodes = out;
}
