use crate::models::CalloutKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Quote,
    Callout(CalloutKind),
}

/// A line of the quote family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteLine<'a> {
    /// `> text`
    Content(QuoteKind, &'a str),
    /// `>> source`
    Source(&'a str),
}

impl QuoteLine<'_> {
    pub const QUOTE: &'static str = ">";
    pub const SOURCE: &'static str = ">> ";
    pub const IMPORTANT: &'static str = ">! ";
    pub const QUESTION: &'static str = ">? ";
    pub const BOX: &'static str = ">: ";

    pub fn parse(line: &str) -> Option<QuoteLine<'_>> {
        if let Some(source) = line.strip_prefix(Self::SOURCE) {
            return Some(QuoteLine::Source(source.trim()));
        }
        for (prefix, kind) in [
            (Self::IMPORTANT, CalloutKind::Important),
            (Self::QUESTION, CalloutKind::Question),
            (Self::BOX, CalloutKind::Box),
        ] {
            if let Some(text) = line.strip_prefix(prefix) {
                return Some(QuoteLine::Content(QuoteKind::Callout(kind), text.trim()));
            }
        }
        let rest = line.strip_prefix(Self::QUOTE)?;
        if rest.trim().is_empty() {
            return Some(QuoteLine::Content(QuoteKind::Quote, ""));
        }
        rest.strip_prefix(' ')
            .map(|text| QuoteLine::Content(QuoteKind::Quote, text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_quote() {
        assert_eq!(
            QuoteLine::parse("> To be"),
            Some(QuoteLine::Content(QuoteKind::Quote, "To be"))
        );
        assert_eq!(
            QuoteLine::parse(">"),
            Some(QuoteLine::Content(QuoteKind::Quote, ""))
        );
    }

    #[test]
    fn quote_source() {
        assert_eq!(
            QuoteLine::parse(">> Shakespeare"),
            Some(QuoteLine::Source("Shakespeare"))
        );
    }

    #[test]
    fn callouts() {
        assert_eq!(
            QuoteLine::parse(">! Careful"),
            Some(QuoteLine::Content(
                QuoteKind::Callout(CalloutKind::Important),
                "Careful"
            ))
        );
        assert_eq!(
            QuoteLine::parse(">? Why"),
            Some(QuoteLine::Content(
                QuoteKind::Callout(CalloutKind::Question),
                "Why"
            ))
        );
        assert_eq!(
            QuoteLine::parse(">: Note"),
            Some(QuoteLine::Content(QuoteKind::Callout(CalloutKind::Box), "Note"))
        );
    }

    #[test]
    fn not_a_quote() {
        assert_eq!(QuoteLine::parse(">no space"), None);
        assert_eq!(QuoteLine::parse("a > b"), None);
    }
}
