mod outline;

use anyhow::{Context, Result, bail};
use slidemark_config::{CONFIG_FILE_NAME, Config};
use slidemark_engine::{ChapterSource, Language, Metadata, ParseOptions, compile, render};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

use outline::OutlineRenderer;

fn usage(program: &str) {
    eprintln!("Usage: {program} [config-file] [--json]");
    eprintln!("       {program} init [config-file]");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("slidemark");
    let json = args.iter().skip(1).any(|a| a == "--json");
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    match positional.as_slice() {
        ["init"] => init(Path::new(CONFIG_FILE_NAME)),
        ["init", path] => init(Path::new(path)),
        [] => build(Path::new(CONFIG_FILE_NAME), json),
        [path] => build(Path::new(path), json),
        _ => {
            usage(program);
            process::exit(1);
        }
    }
}

/// Writes a starter config.
fn init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    Config::default().save_to_path(config_path)?;
    log::info!("Wrote {}", config_path.display());
    Ok(())
}

fn build(config_path: &Path, json: bool) -> Result<()> {
    let Some(config) = Config::load_from_path(config_path)? else {
        eprintln!("Error: no config file found at {}", config_path.display());
        eprintln!("Create one with `slidemark init`");
        process::exit(1);
    };
    log::info!("Config path: {}", config_path.display());

    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(PathBuf::new);
    let sources = config
        .chapter_paths(&base_dir)?
        .iter()
        .map(|path| {
            ChapterSource::from_file(path)
                .with_context(|| format!("Failed to load chapter {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    if sources.is_empty() {
        log::warn!("No chapter files matched {:?}", config.chapters);
    }

    let (metadata, options) = engine_settings(config);
    let language = metadata.language;
    let presentation = compile(&sources, &options, metadata)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&presentation)?);
    } else {
        let mut renderer = OutlineRenderer::new(language);
        render(&presentation, &mut renderer)?;
        print!("{}", renderer.into_string());
    }
    Ok(())
}

/// Splits the project config into what the engine needs.
fn engine_settings(config: Config) -> (Metadata, ParseOptions) {
    let language = Language::from_code(&config.language).unwrap_or_else(|| {
        log::warn!(
            "Unknown language {:?}, using {}",
            config.language,
            Language::default().code()
        );
        Language::default()
    });
    let metadata = Metadata {
        language,
        title1: config.title1,
        title2: config.title2,
        subtitle: config.subtitle,
        author: config.author,
        copyright: config.copyright,
        description: config.description,
    };
    let options = ParseOptions {
        default_language: config.default_code_language,
        front_matter_pages: config.front_matter_pages,
    };
    (metadata, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn config_maps_onto_engine_settings() {
        let config = Config {
            title1: Some("Rust".into()),
            language: "de".into(),
            default_code_language: "rust".into(),
            front_matter_pages: 3,
            ..Config::default()
        };

        let (metadata, options) = engine_settings(config);

        assert_eq!(metadata.language, Language::German);
        assert_eq!(metadata.title1.as_deref(), Some("Rust"));
        assert_eq!(options.default_language, "rust");
        assert_eq!(options.front_matter_pages, 3);
    }

    #[test]
    fn unknown_language_falls_back_to_default() {
        let config = Config {
            language: "fr".into(),
            ..Config::default()
        };
        assert_eq!(engine_settings(config).0.language, Language::English);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        init(&path).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), Some(Config::default()));
        assert!(init(&path).is_err());
    }

    #[test]
    fn build_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(temp_dir.path().join("01.md"), "# A\n## B\n  stray\n").unwrap();
        Config::default().save_to_path(&config_path).unwrap();

        let err = build(&config_path, false).unwrap_err();

        assert!(err.to_string().contains("01.md:3"), "{err}");
    }
}
