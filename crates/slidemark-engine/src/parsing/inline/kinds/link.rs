/// `[text](url "title")` and `[text](<url>)`.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const ANGLE_OPEN: u8 = b'<';
    pub const ANGLE_CLOSE: u8 = b'>';
    pub const TITLE: u8 = b'"';
    pub const ESCAPE: u8 = b'\\';

    /// Drops the backslash of escaped characters in a bare destination.
    pub fn unescape(href: &str) -> String {
        let mut out = String::with_capacity(href.len());
        let mut chars = href.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => out.extend(chars.next()),
                _ => out.push(c),
            }
        }
        out
    }
}

/// `[[key]]`
pub struct Citation;

impl Citation {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
}

/// `[^key]`
pub struct FootnoteMarker;

impl FootnoteMarker {
    pub const OPEN: &'static str = "[^";
    pub const CLOSE: &'static str = "]";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_destination() {
        assert_eq!(Link::unescape(r"a\ b"), "a b");
        assert_eq!(Link::unescape(r"a\)"), "a)");
        assert_eq!(Link::unescape("plain"), "plain");
    }
}
