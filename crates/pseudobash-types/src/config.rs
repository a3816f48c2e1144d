//! Shell configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working shell.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Top-level shell configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Host label shown in the prompt and by `whoishost`.
    pub host_label: String,
    /// Overrides the OS user name when set.
    pub user_name: Option<String>,
    /// Extension appended by `make file` and `read` when missing.
    pub text_extension: String,
    /// The one extension `play` accepts.
    pub audio_extension: String,
    /// Width each entry is padded to in `help` and `lookhere` listings.
    pub column_width: usize,
    /// Entries per row in `help` and `lookhere` listings.
    pub columns: usize,
    /// Blank lines emitted by `clear`.
    pub clear_lines: usize,
    /// ANSI colouring of the prompt, errors, and listings.
    pub color: bool,
    pub audio: AudioConfig,
}

/// Playback settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Player command line; the track path is appended as the last argument.
    pub player: Vec<String>,
    /// File name -> author label, used for the "Started playing" notice.
    pub authors: BTreeMap<String, String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            host_label: "pseudobash".to_string(),
            user_name: None,
            text_extension: ".txt".to_string(),
            audio_extension: ".wav".to_string(),
            column_width: 23,
            columns: 3,
            clear_lines: 50,
            color: true,
            audio: AudioConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        let mut authors = BTreeMap::new();
        authors.insert("kyrgyzstan.wav".to_string(), "Benjamin Tabatchnik".to_string());
        authors.insert("vabere.wav".to_string(), "Benjamin Tabatchnik".to_string());
        authors.insert("gruppa-krovi.wav".to_string(), "Kino".to_string());
        Self {
            player: vec!["aplay".to_string(), "-q".to_string()],
            authors,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(ShellError::Config("columns must be at least 1".to_string()));
        }
        if !self.audio_extension.starts_with('.') || !self.text_extension.starts_with('.') {
            return Err(ShellError::Config(
                "extensions must start with '.'".to_string(),
            ));
        }
        if self.audio.player.is_empty() {
            return Err(ShellError::Config("audio.player must name a program".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let c = ShellConfig::default();
        assert_eq!(c.host_label, "pseudobash");
        assert_eq!(c.column_width, 23);
        assert_eq!(c.columns, 3);
        assert_eq!(c.clear_lines, 50);
        assert_eq!(c.text_extension, ".txt");
        assert_eq!(c.audio_extension, ".wav");
        assert_eq!(c.audio.authors.get("gruppa-krovi.wav").map(String::as_str), Some("Kino"));
    }

    #[test]
    fn empty_toml_is_default() {
        let c = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(c.host_label, "pseudobash");
        assert!(c.color);
    }

    #[test]
    fn partial_override() {
        let c = ShellConfig::from_toml_str(
            r#"
            host_label = "box"
            color = false

            [audio]
            player = ["paplay"]
            "#,
        )
        .unwrap();
        assert_eq!(c.host_label, "box");
        assert!(!c.color);
        assert_eq!(c.audio.player, vec!["paplay".to_string()]);
        // An explicit [audio] table without authors falls back to the defaults.
        assert_eq!(c.audio.authors.len(), 3);
    }

    #[test]
    fn zero_columns_rejected() {
        let err = ShellConfig::from_toml_str("columns = 0").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn bad_extension_rejected() {
        let err = ShellConfig::from_toml_str("audio_extension = \"wav\"").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ShellConfig::from_toml_str("host_label = ").unwrap_err();
        assert!(matches!(err, ShellError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pseudobash.toml");
        std::fs::write(&path, "clear_lines = 5\n").unwrap();
        let c = ShellConfig::load(&path).unwrap();
        assert_eq!(c.clear_lines, 5);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }
}
