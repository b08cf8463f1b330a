//! Localized labels.
//!
//! The language is always passed in explicitly, usually from the
//! presentation's [`Metadata`](crate::models::Metadata).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// Parses an ISO 639-1 code such as `en` or `de`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::English),
            "de" => Some(Language::German),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    TableOfContents,
    Chapter,
    Slide,
    Hidden,
    Notes,
    Source,
}

pub fn label(language: Language, label: Label) -> &'static str {
    match (language, label) {
        (Language::English, Label::TableOfContents) => "Table of Contents",
        (Language::German, Label::TableOfContents) => "Inhaltsverzeichnis",
        (Language::English, Label::Chapter) => "Chapter",
        (Language::German, Label::Chapter) => "Kapitel",
        (Language::English, Label::Slide) => "Slide",
        (Language::German, Label::Slide) => "Folie",
        (Language::English, Label::Hidden) => "hidden",
        (Language::German, Label::Hidden) => "versteckt",
        (Language::English, Label::Notes) => "Notes",
        (Language::German, Label::Notes) => "Notizen",
        (Language::English, Label::Source) => "Source",
        (Language::German, Label::Source) => "Quelle",
    }
}
