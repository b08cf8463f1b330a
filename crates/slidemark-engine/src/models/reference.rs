use serde::Serialize;

use super::node::RichText;

/// A `[^key]: text` definition collected while scanning a slide.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Footnote {
    pub key: String,
    /// 1-based position within the owning slide.
    pub number: usize,
    pub text: RichText,
}

impl Footnote {
    pub fn new(key: impl Into<String>, number: usize, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            number,
            text: RichText::new(text),
        }
    }
}

/// Footnotes are equal when key and text agree, wherever they were defined.
impl PartialEq for Footnote {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.text.content() == other.text.content()
    }
}

/// A reference-style link definition `[label]: target "title"`, owned by its chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDefinition {
    pub key: String,
    pub target: String,
    pub title: Option<String>,
}

impl LinkDefinition {
    /// Reference labels match case-insensitively.
    pub fn matches(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key.trim())
    }

    /// The ordinary inline link this definition stands for.
    pub fn inline_form(&self, label: &str) -> String {
        match &self.title {
            Some(title) => format!("[{label}]({} \"{title}\")", self.target),
            None => format!("[{label}]({})", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footnote_equality_ignores_number() {
        assert_eq!(Footnote::new("1", 1, "Note"), Footnote::new("1", 3, "Note"));
        assert_ne!(Footnote::new("1", 1, "Note"), Footnote::new("1", 1, "Other"));
    }

    #[test]
    fn link_inline_form_with_title() {
        let link = LinkDefinition {
            key: "docs".into(),
            target: "https://example.org".into(),
            title: Some("Docs".into()),
        };
        assert_eq!(
            link.inline_form("the docs"),
            "[the docs](https://example.org \"Docs\")"
        );
    }

    #[test]
    fn link_matches_case_insensitively() {
        let link = LinkDefinition {
            key: "Docs".into(),
            target: "x".into(),
            title: None,
        };
        assert!(link.matches("docs"));
        assert!(!link.matches("doc"));
    }
}
