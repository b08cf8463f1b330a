use std::sync::OnceLock;

use regex::Regex;

use super::regex;
use crate::models::Alignment;

/// A table line: a row of cells or a separator row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLine {
    Row(Vec<String>),
    Separator(Vec<Alignment>),
}

impl TableLine {
    pub const PIPE: char = '|';

    pub fn parse(line: &str) -> Option<TableLine> {
        static SEPARATOR: OnceLock<Regex> = OnceLock::new();
        let line = line.trim_end();
        if !line.starts_with(Self::PIPE) || !line.ends_with(Self::PIPE) || line.len() < 2 {
            return None;
        }
        let cells = split_cells(&line[1..line.len() - 1]);
        if regex(&SEPARATOR, r"^\|(?:\s*:?-+:?\s*\|)+$").is_match(line) {
            return Some(TableLine::Separator(
                cells.iter().map(|c| alignment(c)).collect(),
            ));
        }
        Some(TableLine::Row(cells))
    }
}

/// Splits on `|`, honouring `\|` escapes.
fn split_cells(inner: &str) -> Vec<String> {
    let mut cells = vec![];
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&TableLine::PIPE) => {
                current.push(TableLine::PIPE);
                chars.next();
            }
            TableLine::PIPE => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

fn alignment(cell: &str) -> Alignment {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::Default,
    }
}
