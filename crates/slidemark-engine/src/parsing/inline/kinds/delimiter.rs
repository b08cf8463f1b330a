use std::ops::Range;

use super::Emphasis;

/// How many characters of a run a span consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Runs of exactly one character.
    Single,
    /// The first two characters of an opening run, the last two of a
    /// closing run; runs must be at least two long.
    Double,
}

impl Width {
    fn fits(self, len: usize) -> bool {
        match self {
            Width::Single => len == 1,
            Width::Double => len >= 2,
        }
    }
}

/// A maximal run of one delimiter character with its flanking facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterRun {
    pub start: usize,
    pub len: usize,
    pub can_open: bool,
    pub can_close: bool,
}

impl DelimiterRun {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Finds every run of `marker` in `s`. Positions inside `protected`
    /// ranges do not count as delimiters.
    pub fn scan(s: &str, marker: u8, protected: &[Range<usize>]) -> Vec<DelimiterRun> {
        let bytes = s.as_bytes();
        let mut runs = vec![];
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != marker || is_protected(protected, i) {
                i += 1;
                continue;
            }
            let start = i;
            while i < bytes.len() && bytes[i] == marker && !is_protected(protected, i) {
                i += 1;
            }
            let prev = s[..start].chars().next_back();
            let next = s[i..].chars().next();
            let (can_open, can_close) = flanking(marker, prev, next);
            runs.push(DelimiterRun {
                start,
                len: i - start,
                can_open,
                can_close,
            });
        }
        runs
    }

    /// Pairs each opener with the nearest eligible closer, left to right.
    /// Returns the (open, close) delimiter ranges of every pair.
    pub fn pair(runs: &[DelimiterRun], width: Width) -> Vec<(Range<usize>, Range<usize>)> {
        let mut pairs = vec![];
        let mut i = 0;
        while i < runs.len() {
            let open = runs[i];
            if width.fits(open.len) && open.can_open {
                let closer = (i + 1..runs.len())
                    .find(|&j| width.fits(runs[j].len) && runs[j].can_close);
                if let Some(j) = closer {
                    let close = runs[j];
                    let n = match width {
                        Width::Single => 1,
                        Width::Double => 2,
                    };
                    pairs.push((open.start..open.start + n, close.end() - n..close.end()));
                    i = j + 1;
                    continue;
                }
            }
            i += 1;
        }
        pairs
    }
}

/// Whether a run may open and whether it may close a span.
///
/// A run opens when followed by a non-whitespace character and closes when
/// preceded by one. Underscores inside words do neither, unless the other
/// side is punctuation.
fn flanking(marker: u8, prev: Option<char>, next: Option<char>) -> (bool, bool) {
    let left = next.is_some_and(|c| !c.is_whitespace());
    let right = prev.is_some_and(|c| !c.is_whitespace());
    if marker == Emphasis::UNDERSCORE {
        let prev_punct = prev.is_some_and(|c| c.is_ascii_punctuation());
        let next_punct = next.is_some_and(|c| c.is_ascii_punctuation());
        (left && (!right || prev_punct), right && (!left || next_punct))
    } else {
        (left, right)
    }
}

pub fn is_protected(protected: &[Range<usize>], pos: usize) -> bool {
    protected.iter().any(|r| r.contains(&pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*a*", 0, true, false)]
    #[case("*a*", 1, false, true)]
    #[case("a * b", 0, false, false)]
    #[case("5*6*78", 0, true, true)]
    fn star_flanking(
        #[case] s: &str,
        #[case] run: usize,
        #[case] can_open: bool,
        #[case] can_close: bool,
    ) {
        let runs = DelimiterRun::scan(s, b'*', &[]);
        assert_eq!((runs[run].can_open, runs[run].can_close), (can_open, can_close));
    }

    #[test]
    fn underscore_inside_word_neither_opens_nor_closes() {
        let runs = DelimiterRun::scan("snake_case", b'_', &[]);
        assert_eq!(runs.len(), 1);
        assert!(!runs[0].can_open);
        assert!(!runs[0].can_close);
    }

    #[test]
    fn underscore_after_punctuation_opens() {
        let runs = DelimiterRun::scan("(_a_)", b'_', &[]);
        assert!(runs[0].can_open);
        assert!(runs[1].can_close);
    }

    #[test]
    fn protected_positions_are_skipped() {
        let runs = DelimiterRun::scan("*a `*` b*", b'*', &[3..6]);
        let starts: Vec<usize> = runs.iter().map(|r| r.start).collect();
        assert_eq!(starts, [0, 8]);
    }

    #[test]
    fn double_width_uses_outer_characters() {
        let runs = DelimiterRun::scan("***x***", b'*', &[]);
        assert_eq!(DelimiterRun::pair(&runs, Width::Double), vec![(0..2, 5..7)]);
        assert!(DelimiterRun::pair(&runs, Width::Single).is_empty());
    }
}
