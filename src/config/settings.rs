use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::theme::ThemePreset;
use crate::cli::Cli;
use crate::verses::VerseSource;

const APP_DIR: &str = "verse-sprout";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_SOURCE: &str = "data/verses.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file path or http(s) URL of the verse collection.
    pub source: String,
    /// Age group selected on startup. An empty string starts unfiltered.
    pub initial_age_group: Option<String>,
    pub theme: ThemePreset,
    /// Text-to-speech program. When unset the first known one on `PATH` is used.
    pub speech_command: Option<String>,
    /// Extra arguments placed before the verse text, e.g. `["-v", "en"]`.
    pub speech_args: Vec<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            initial_age_group: Some("preteens".to_string()),
            theme: ThemePreset::Light,
            speech_command: None,
            speech_args: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path (which must exist) or from the default
    /// location, falling back to defaults when no file is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref source) = cli.source {
            self.source = source.clone();
        }
        if let Some(ref age_group) = cli.age_group {
            self.initial_age_group = Some(age_group.clone());
        }
        match cli.verbose {
            0 => {}
            1 => self.log_level = "debug".to_string(),
            _ => self.log_level = "trace".to_string(),
        }
    }

    pub fn verse_source(&self) -> VerseSource {
        VerseSource::parse(&self.source)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Directory for the log file.
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find local data directory"))?
        .join(APP_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_start_on_preteens_in_light_mode() {
        let config = AppConfig::default();
        assert_eq!(config.initial_age_group.as_deref(), Some("preteens"));
        assert_eq!(config.theme, ThemePreset::Light);
        assert_eq!(config.verse_source(), VerseSource::File(PathBuf::from(DEFAULT_SOURCE)));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "source = \"https://example.org/verses.json\"\ntheme = \"dark\"\nspeech_args = [\"-v\", \"en\"]"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.theme, ThemePreset::Dark);
        assert_eq!(config.speech_args, vec!["-v", "en"]);
        assert_eq!(config.initial_age_group.as_deref(), Some("preteens"));
        assert!(matches!(config.verse_source(), VerseSource::Url(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = 42").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut config = AppConfig::default();
        let cli = Cli::parse_from(["verse-sprout", "-s", "other.json", "--age-group", "", "-v"]);
        config.apply_cli(&cli);

        assert_eq!(config.source, "other.json");
        assert_eq!(config.initial_age_group.as_deref(), Some(""));
        assert_eq!(config.log_level, "debug");
    }
}
