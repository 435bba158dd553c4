use std::path::{Path, PathBuf};

use jocose_core::{Config, Filter};
use serde::Deserialize;

use crate::error::JoxError;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub lang: Option<String>,
    pub label: Option<String>,
    pub threshold: Option<f64>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub lang: Option<String>,
    pub label: Option<String>,
    pub threshold: Option<f64>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("jocose").join("config.toml"))
}

fn parse(path: &Path, content: &str) -> Result<FileConfig, JoxError> {
    toml::from_str(content).map_err(|source| JoxError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the config file.
///
/// An explicit path must exist and parse. The default location is optional:
/// if it is missing or unreadable the built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, JoxError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|source| JoxError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        return parse(path, &content);
    }

    let Some(path) = config_path() else {
        return Ok(FileConfig::default());
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Ok(FileConfig::default());
    };

    parse(&path, &content)
}

/// Merges CLI flags, config file and defaults, in that order of precedence.
pub fn resolve(cli: Overrides, file: FileConfig) -> Config {
    let defaults = Config::default();

    Config {
        input_path: cli.input.or(file.input).unwrap_or(defaults.input_path),
        output_path: cli.output.or(file.output).unwrap_or(defaults.output_path),
        filter: Filter {
            language: cli
                .lang
                .or(file.filter.lang)
                .unwrap_or(defaults.filter.language),
            label: cli
                .label
                .or(file.filter.label)
                .unwrap_or(defaults.filter.label),
            threshold: cli
                .threshold
                .or(file.filter.threshold)
                .unwrap_or(defaults.filter.threshold),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_everything_gives_defaults() {
        let config = resolve(Overrides::default(), FileConfig::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            input = "dump.jsonl"

            [filter]
            lang = "de"
            threshold = 0.5
            "#,
        )
        .unwrap();

        let config = resolve(Overrides::default(), file);

        assert_eq!(config.input_path, PathBuf::from("dump.jsonl"));
        assert_eq!(config.output_path, Config::default().output_path);
        assert_eq!(config.filter.language, "de");
        assert_eq!(config.filter.label, "humor");
        assert_eq!(config.filter.threshold, 0.5);
    }

    #[test]
    fn cli_overrides_file() {
        let file = FileConfig {
            input: Some(PathBuf::from("from-file.jsonl")),
            output: Some(PathBuf::from("out-file.jsonl")),
            filter: FilterConfig {
                lang: Some("de".to_string()),
                label: Some("toxicity".to_string()),
                threshold: Some(0.5),
            },
        };
        let cli = Overrides {
            input: Some(PathBuf::from("from-cli.jsonl")),
            lang: Some("en".to_string()),
            threshold: Some(0.9),
            ..Default::default()
        };

        let config = resolve(cli, file);

        assert_eq!(config.input_path, PathBuf::from("from-cli.jsonl"));
        assert_eq!(config.output_path, PathBuf::from("out-file.jsonl"));
        assert_eq!(config.filter.language, "en");
        assert_eq!(config.filter.label, "toxicity");
        assert_eq!(config.filter.threshold, 0.9);
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jocose.toml");
        std::fs::write(&path, "output = \"picked.jsonl\"\n").unwrap();

        let file = load_config(Some(&path)).unwrap();

        assert_eq!(file.output, Some(PathBuf::from("picked.jsonl")));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, JoxError::ConfigIo { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jocose.toml");
        std::fs::write(&path, "humor_min = 0.5\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, JoxError::Config { .. }));
    }
}
