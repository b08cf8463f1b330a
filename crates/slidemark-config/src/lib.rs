use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "slidemark.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid chapter pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to expand chapter pattern {pattern:?}: {source}")]
    GlobError {
        pattern: String,
        source: glob::GlobError,
    },
}

/// A presentation project: metadata for the title pages and the chapter
/// files in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title1: Option<String>,
    pub title2: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub description: Option<String>,
    /// ISO 639-1 code, `en` or `de`.
    pub language: String,
    pub default_code_language: String,
    pub front_matter_pages: usize,
    /// Chapter files or glob patterns, relative to the config file.
    pub chapters: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title1: None,
            title2: None,
            subtitle: None,
            author: None,
            copyright: None,
            description: None,
            language: "en".to_string(),
            default_code_language: "java".to_string(),
            front_matter_pages: 0,
            chapters: vec!["*.md".to_string()],
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Expands `chapters` into file paths, in the order listed.
    ///
    /// Each entry is shell-expanded and resolved against `base_dir`. Glob
    /// patterns contribute their matches sorted by path; plain entries are
    /// kept as given, whether or not the file exists.
    pub fn chapter_paths(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        let mut paths = vec![];
        for entry in &self.chapters {
            let expanded = Self::expand_path(Path::new(entry)).unwrap_or_else(|| entry.into());
            let path = base_dir.join(expanded);
            let pattern = path.to_string_lossy().into_owned();
            if !is_pattern(&pattern) {
                paths.push(path);
                continue;
            }

            let matches = glob::glob(&pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            let mut found = matches
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| ConfigError::GlobError {
                    pattern: pattern.clone(),
                    source,
                })?;
            found.sort();
            paths.extend(found);
        }
        Ok(paths)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

fn is_pattern(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config: Config = toml::from_str(r#"title1 = "Rust""#).unwrap();

        assert_eq!(config.title1.as_deref(), Some("Rust"));
        assert_eq!(config.language, "en");
        assert_eq!(config.default_code_language, "java");
        assert_eq!(config.front_matter_pages, 0);
        assert_eq!(config.chapters, ["*.md"]);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            title1: Some("Programming".into()),
            author: Some("A. Author".into()),
            language: "de".into(),
            front_matter_pages: 2,
            chapters: vec!["01_intro.md".into(), "chapters/*.md".into()],
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SLIDEMARK_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$SLIDEMARK_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("SLIDEMARK_TEST_VAR");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_file, "front_matter_pages = \"two\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { config_path, .. } if config_path == config_file));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);
        let test_config = Config {
            title1: Some("Slides".into()),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_chapter_globs_are_sorted_and_ordered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("parts")).unwrap();
        for name in ["parts/b.md", "parts/a.md", "parts/notes.txt", "intro.md"] {
            std::fs::write(root.join(name), "# C\n").unwrap();
        }
        let config = Config {
            chapters: vec!["intro.md".into(), "parts/*.md".into(), "missing.md".into()],
            ..Config::default()
        };

        let paths = config.chapter_paths(root).unwrap();

        assert_eq!(
            paths,
            [
                root.join("intro.md"),
                root.join("parts/a.md"),
                root.join("parts/b.md"),
                root.join("missing.md"),
            ]
        );
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let config = Config {
            chapters: vec!["[.md".into()],
            ..Config::default()
        };

        let err = config.chapter_paths(Path::new("")).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
