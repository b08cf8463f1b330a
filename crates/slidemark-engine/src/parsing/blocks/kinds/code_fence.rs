use std::sync::OnceLock;

use regex::Regex;

use super::regex;

/// An opening fence with its optional tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    pub language: Option<String>,
    pub order: Option<u32>,
    pub caption: Option<String>,
}

/// Fenced code: ```` ```lang[order]{caption} ```` … ```` ``` ````.
pub struct CodeFence;

impl CodeFence {
    pub const MARKER: &'static str = "```";

    pub fn open(line: &str) -> Option<Fence> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(
            &RE,
            r"^```([A-Za-z0-9_+#.\-]*)(?:\[(\d+)\])?(?:\{(.*)\})?\s*$",
        )
        .captures(line)?;
        Some(Fence {
            language: caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            order: caps.get(2).and_then(|m| m.as_str().parse().ok()),
            caption: caps.get(3).map(|m| m.as_str().trim().to_string()),
        })
    }

    pub fn closes(line: &str) -> bool {
        line.trim_end() == Self::MARKER
    }
}

/// Code indented by four spaces. A `*` or `-` in the fifth column is a
/// level-2 list bullet, not code.
pub struct IndentedCode;

impl IndentedCode {
    pub const INDENT: &'static str = "    ";

    /// Returns the line without its four-space prefix.
    pub fn parse(line: &str) -> Option<&str> {
        let code = line.strip_prefix(Self::INDENT)?;
        match code.chars().next() {
            Some('*' | '-') => None,
            _ => Some(code),
        }
    }
}

/// `!INCLUDESRC[order] "path" lang`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub path: String,
    pub language: Option<String>,
    pub order: Option<u32>,
}

pub struct IncludeSource;

impl IncludeSource {
    pub fn parse(line: &str) -> Option<Include> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r#"^!INCLUDESRC(?:\[(\d+)\])?\s+"([^"]+)"(?:\s+(\S+))?\s*$"#)
            .captures(line)?;
        Some(Include {
            path: caps.get(2)?.as_str().to_string(),
            language: caps.get(3).map(|m| m.as_str().to_string()),
            order: caps.get(1).and_then(|m| m.as_str().parse().ok()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_with_all_tags() {
        assert_eq!(
            CodeFence::open("```java[2]{Listing 1}"),
            Some(Fence {
                language: Some("java".into()),
                order: Some(2),
                caption: Some("Listing 1".into()),
            })
        );
    }

    #[test]
    fn bare_fence_opens_without_language() {
        assert_eq!(
            CodeFence::open("```"),
            Some(Fence {
                language: None,
                order: None,
                caption: None,
            })
        );
        assert!(CodeFence::closes("```"));
        assert!(!CodeFence::closes("```java"));
    }

    #[test]
    fn fence_language_with_symbols() {
        assert_eq!(
            CodeFence::open("```c++").and_then(|f| f.language),
            Some("c++".to_string())
        );
        assert_eq!(
            CodeFence::open("```c#").and_then(|f| f.language),
            Some("c#".to_string())
        );
    }

    #[test]
    fn indented_code_keeps_extra_indentation() {
        assert_eq!(IndentedCode::parse("        nested();"), Some("    nested();"));
        assert_eq!(IndentedCode::parse("    x = 1"), Some("x = 1"));
    }

    #[test]
    fn indented_bullet_is_not_code() {
        assert_eq!(IndentedCode::parse("    * item"), None);
        assert_eq!(IndentedCode::parse("    - item"), None);
        assert_eq!(IndentedCode::parse("   three"), None);
    }

    #[test]
    fn include_directive() {
        assert_eq!(
            IncludeSource::parse(r#"!INCLUDESRC[3] "src/Main.java" java"#),
            Some(Include {
                path: "src/Main.java".into(),
                language: Some("java".into()),
                order: Some(3),
            })
        );
        assert_eq!(
            IncludeSource::parse(r#"!INCLUDESRC "a.txt""#),
            Some(Include {
                path: "a.txt".into(),
                language: None,
                order: None,
            })
        );
        assert_eq!(IncludeSource::parse("!INCLUDESRC a.txt"), None);
    }
}
