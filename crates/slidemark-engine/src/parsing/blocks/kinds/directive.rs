use std::sync::OnceLock;

use regex::Regex;

use super::regex;

/// HTML-comment directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `<!-- Spacing: N -->`
    Spacing(u32),
    /// `<!-- INPUT -->` or `<!-- INPUT answer="..." -->`
    Input { answer: Option<String> },
    /// `<!-- SHUFFLE type="..." -->` opens a matching question.
    Shuffle { kind: String },
    /// Any other `<!-- ... -->`, with its trimmed text.
    Comment(String),
}

impl Directive {
    pub fn parse(line: &str) -> Option<Directive> {
        static COMMENT: OnceLock<Regex> = OnceLock::new();
        static SPACING: OnceLock<Regex> = OnceLock::new();
        static INPUT: OnceLock<Regex> = OnceLock::new();
        static SHUFFLE: OnceLock<Regex> = OnceLock::new();

        let caps = regex(&COMMENT, r"^<!--(.*?)-->\s*$").captures(line)?;
        let body = caps.get(1)?.as_str().trim();

        if let Some(c) = regex(&SPACING, r"^Spacing:\s*(\d+)$").captures(body) {
            if let Ok(n) = c[1].parse() {
                return Some(Directive::Spacing(n));
            }
        }
        if let Some(c) = regex(&INPUT, r#"^INPUT(?:\s+answer="([^"]*)")?$"#).captures(body) {
            return Some(Directive::Input {
                answer: c.get(1).map(|m| m.as_str().to_string()),
            });
        }
        if let Some(c) = regex(&SHUFFLE, r#"^SHUFFLE\s+type="([^"]*)"$"#).captures(body) {
            return Some(Directive::Shuffle {
                kind: c[1].to_string(),
            });
        }
        Some(Directive::Comment(body.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<!-- Spacing: 3 -->", Directive::Spacing(3))]
    #[case("<!--Spacing:12-->", Directive::Spacing(12))]
    #[case("<!-- INPUT -->", Directive::Input { answer: None })]
    #[case(r#"<!-- INPUT answer="42" -->"#, Directive::Input { answer: Some("42".into()) })]
    #[case(r#"<!-- SHUFFLE type="pairs" -->"#, Directive::Shuffle { kind: "pairs".into() })]
    #[case("<!-- remember the demo -->", Directive::Comment("remember the demo".into()))]
    fn directives(#[case] line: &str, #[case] expected: Directive) {
        assert_eq!(Directive::parse(line), Some(expected));
    }

    #[test]
    fn unterminated_comment_is_not_a_directive() {
        assert_eq!(Directive::parse("<!-- open"), None);
        assert_eq!(Directive::parse("text <!-- x -->"), None);
    }
}
