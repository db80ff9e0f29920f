//! Configuration system: TOML file + env var overrides + defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, UnderstudyError};

/// Name of the per-project config file.
pub const CONFIG_FILE_NAME: &str = "understudy.toml";

/// Full understudy configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub transcript: TranscriptConfig,
    pub display: DisplayConfig,
}

/// Invocation transcript (JSONL) settings. Off unless enabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TranscriptConfig {
    pub enabled: bool,
    /// Transcript file for one mock; required when enabled. Truncated when
    /// the mock opens it.
    pub path: Option<PathBuf>,
    /// Lines that would grow the file past this size are dropped.
    pub max_size_bytes: u64,
    /// Record rendered result containers on `invoke` lines.
    pub include_results: bool,
}

/// Rendering limits for values in transcript lines and error messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum characters per rendered value; `0` means unlimited.
    pub max_render_len: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            max_size_bytes: 16 * 1024 * 1024,
            include_results: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_render_len: 256,
        }
    }
}

impl Config {
    /// Default config path: `understudy.toml` in the crate under test when
    /// run by cargo, else in the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map_or_else(PathBuf::new, PathBuf::from)
            .join(CONFIG_FILE_NAME)
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, env_var)
    }

    /// [`Config::load`] with an injectable environment lookup.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf)
                .map_err(|source| UnderstudyError::io(&path_buf, source))?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(UnderstudyError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides_from(lookup)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("UNDERSTUDY_TRANSCRIPT_ENABLED") {
            self.transcript.enabled = parse_env("UNDERSTUDY_TRANSCRIPT_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("UNDERSTUDY_TRANSCRIPT_PATH") {
            self.transcript.path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = lookup("UNDERSTUDY_TRANSCRIPT_MAX_SIZE_BYTES") {
            self.transcript.max_size_bytes =
                parse_env("UNDERSTUDY_TRANSCRIPT_MAX_SIZE_BYTES", &raw)?;
        }
        if let Some(raw) = lookup("UNDERSTUDY_TRANSCRIPT_INCLUDE_RESULTS") {
            self.transcript.include_results =
                parse_env("UNDERSTUDY_TRANSCRIPT_INCLUDE_RESULTS", &raw)?;
        }
        if let Some(raw) = lookup("UNDERSTUDY_DISPLAY_MAX_RENDER_LEN") {
            self.display.max_render_len = parse_env("UNDERSTUDY_DISPLAY_MAX_RENDER_LEN", &raw)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let has_path = self
            .transcript
            .path
            .as_ref()
            .is_some_and(|path| !path.as_os_str().is_empty());
        if self.transcript.enabled && !has_path {
            return Err(UnderstudyError::InvalidConfig {
                details: "transcript.path must be set when transcript.enabled=true".to_string(),
            });
        }

        // A single line must always fit, otherwise every line is dropped.
        if self.transcript.max_size_bytes < 1024 {
            return Err(UnderstudyError::InvalidConfig {
                details: format!(
                    "transcript.max_size_bytes ({}) must be >= 1024",
                    self.transcript.max_size_bytes
                ),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|error| UnderstudyError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}
