//! User configuration for diffnote.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/diffnote/config.toml`
//! (falling back to `~/.config/diffnote/config.toml`). Every key is optional:
//!
//! ```toml
//! theme = "dark"
//! page_size = 20
//! output = "review/feedback.json"
//! strict = true
//! log_file = "/tmp/diffnote.log"
//! diff_command = "git diff HEAD"
//! ```
//!
//! A missing file is not an error. An unreadable or invalid file is reported
//! and the defaults are used, so a typo never prevents a review session.

use std::path::{Path, PathBuf};

use diffnote_core::export::{DEFAULT_DIFF_COMMAND, DEFAULT_OUTPUT};
use serde::Deserialize;
use thiserror::Error;

use crate::acquire::DiffSource;
use crate::cli::Cli;

/// Theme used when neither the CLI nor the config names one.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Contents of `config.toml`; absent keys are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Option<String>,
    pub page_size: Option<u16>,
    pub output: Option<PathBuf>,
    pub strict: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub diff_command: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Returns the path to the diffnote config file.
///
/// Prefers `$XDG_CONFIG_HOME/diffnote/config.toml`; falls back to
/// `~/.config/diffnote/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("diffnote").join("config.toml")
}

/// Loads the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file exists but cannot be read or parsed.
/// A missing file yields `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
    };
    parse_config(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

fn parse_config(raw: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(raw)
}

/// Effective settings after merging CLI flags over config over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: DiffSource,
    pub output: PathBuf,
    pub theme: String,
    /// Fixed page size; `None` pages by the diff panel height.
    pub page_size: Option<u16>,
    pub strict: bool,
    pub log_file: Option<PathBuf>,
    pub diff_command: String,
}

impl Settings {
    /// Merges `cli` over `config`.
    ///
    /// # Arguments
    ///
    /// * `cli` — parsed command-line flags (highest precedence)
    /// * `config` — values from `config.toml`
    pub fn resolve(cli: Cli, config: Config) -> Self {
        let source = match cli.diff_file {
            Some(path) if path.as_os_str() == "-" => DiffSource::Stdin,
            Some(path) => DiffSource::File(path),
            None => DiffSource::Repository,
        };
        Self {
            source,
            output: cli
                .output
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            theme: cli
                .theme
                .or(config.theme)
                .unwrap_or_else(|| DEFAULT_THEME.to_owned()),
            page_size: cli.page_size.or(config.page_size).filter(|&n| n > 0),
            strict: cli.strict || config.strict.unwrap_or(false),
            log_file: cli.log_file.or(config.log_file),
            diff_command: cli
                .diff_command
                .or(config.diff_command)
                .unwrap_or_else(|| DEFAULT_DIFF_COMMAND.to_owned()),
        }
    }

    /// `true` when the feedback goes to stdout instead of a file.
    pub fn output_is_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let config = parse_config(
            r#"
            theme = "dark"
            page_size = 20
            output = "review/feedback.json"
            strict = true
            log_file = "/tmp/diffnote.log"
            diff_command = "git diff main"
            "#,
        )
        .unwrap();
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert_eq!(config.page_size, Some(20));
        assert_eq!(config.output, Some(PathBuf::from("review/feedback.json")));
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.diff_command.as_deref(), Some("git diff main"));
    }

    #[test]
    fn empty_and_unknown_keys_are_tolerated() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        let config = parse_config("theme = \"dark\"\nfuture_key = 1\n").unwrap();
        assert_eq!(config.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(parse_config("page_size = \"big\"").is_err());
        assert!(parse_config("strict = 1").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = ").unwrap();
        match load_config(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_without_flags_or_config() {
        let settings = Settings::resolve(Cli::default(), Config::default());
        assert_eq!(settings.source, DiffSource::Repository);
        assert_eq!(settings.output, PathBuf::from("feedback.json"));
        assert_eq!(settings.theme, DEFAULT_THEME);
        assert_eq!(settings.page_size, None);
        assert!(!settings.strict);
        assert_eq!(settings.diff_command, "git diff HEAD");
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli {
            diff_file: Some(PathBuf::from("-")),
            output: Some(PathBuf::from("-")),
            theme: Some("dark".to_owned()),
            ..Cli::default()
        };
        let config = Config {
            theme: Some("catppuccin-mocha".to_owned()),
            page_size: Some(12),
            strict: Some(true),
            output: Some(PathBuf::from("elsewhere.json")),
            ..Config::default()
        };
        let settings = Settings::resolve(cli, config);
        assert_eq!(settings.source, DiffSource::Stdin);
        assert!(settings.output_is_stdout());
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.page_size, Some(12));
        assert!(settings.strict);
    }

    #[test]
    fn diff_file_path_selects_file_source() {
        let cli = Cli { diff_file: Some(PathBuf::from("changes.patch")), ..Cli::default() };
        let settings = Settings::resolve(cli, Config::default());
        assert_eq!(settings.source, DiffSource::File(PathBuf::from("changes.patch")));
    }
}
