//! Raw blocks: their content is stored line by line without any parsing.

use std::sync::OnceLock;

use regex::Regex;

use super::regex;

/// `<script>` … `</script>`
pub struct ScriptFence;

impl ScriptFence {
    pub const CLOSE: &'static str = "</script>";

    pub fn opens(line: &str) -> bool {
        static RE: OnceLock<Regex> = OnceLock::new();
        regex(&RE, r"^<script(?:\s[^>]*)?>\s*$").is_match(line)
    }

    pub fn closes(line: &str) -> bool {
        line.trim() == Self::CLOSE
    }
}

/// `\[` … `\]` on lines of their own.
pub struct EquationFence;

impl EquationFence {
    pub const OPEN: &'static str = r"\[";
    pub const CLOSE: &'static str = r"\]";

    pub fn opens(line: &str) -> bool {
        line.trim_end() == Self::OPEN
    }

    pub fn closes(line: &str) -> bool {
        line.trim() == Self::CLOSE
    }
}

/// `@startuml[w_slide][w_plain]` … `@enduml`
pub struct UmlFence;

impl UmlFence {
    pub const CLOSE: &'static str = "@enduml";

    /// Returns the optional slide and plain widths.
    pub fn open(line: &str) -> Option<(Option<String>, Option<String>)> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(&RE, r"^@startuml(?:\[([^\]]*)\])?(?:\[([^\]]*)\])?\s*$").captures(line)?;
        let width = |i| {
            caps.get(i)
                .map(|m| m.as_str().trim().to_string())
                .filter(|w| !w.is_empty())
        };
        Some((width(1), width(2)))
    }

    pub fn closes(line: &str) -> bool {
        line.trim() == Self::CLOSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_fences() {
        assert!(ScriptFence::opens("<script>"));
        assert!(ScriptFence::opens(r#"<script type="module">"#));
        assert!(!ScriptFence::opens("<scripts>"));
        assert!(ScriptFence::closes("</script>"));
    }

    #[test]
    fn equation_fences() {
        assert!(EquationFence::opens(r"\["));
        assert!(!EquationFence::opens(r"\[ x \]"));
        assert!(EquationFence::closes(r"\]"));
    }

    #[test]
    fn uml_widths() {
        assert_eq!(UmlFence::open("@startuml"), Some((None, None)));
        assert_eq!(
            UmlFence::open("@startuml[60%][40%]"),
            Some((Some("60%".into()), Some("40%".into())))
        );
        assert_eq!(
            UmlFence::open("@startuml[80%]"),
            Some((Some("80%".into()), None))
        );
        assert!(UmlFence::closes("@enduml"));
    }
}
