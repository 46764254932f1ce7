//! Fingerprint configuration.
//!
//! Resolution order: environment variables → config file → defaults.
//! The CLI applies its own flags on top.
//!
//! Config file location:
//!   1. $COMMUNITY_ID_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/community-id/config.toml
//!   3. ~/.config/community-id/config.toml

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the 20-byte digest is rendered after the `"1:"` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Standard alphabet with padding. 28 characters.
    #[default]
    Base64,
    /// Lowercase, no separators. 40 characters.
    Hex,
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base64" => Ok(Encoding::Base64),
            "hex" => Ok(Encoding::Hex),
            other => Err(ConfigError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Inputs shared by every fingerprint computed with this config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mixed into every digest to namespace IDs per deployment.
    pub seed: u16,
    pub encoding: Encoding,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("unknown encoding {0:?}, expected \"base64\" or \"hex\"")]
    UnknownEncoding(String),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl Config {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_file(&Self::file_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        let config = toml::from_str(&text)
            .map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("COMMUNITY_ID_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Apply COMMUNITY_ID_* env var overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key/value source. Values that do not parse
    /// are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("COMMUNITY_ID_SEED") {
            match v.parse() {
                Ok(seed) => self.seed = seed,
                Err(e) => tracing::warn!(value = %v, error = %e, "ignoring COMMUNITY_ID_SEED"),
            }
        }
        if let Some(v) = lookup("COMMUNITY_ID_ENCODING") {
            match v.parse() {
                Ok(encoding) => self.encoding = encoding,
                Err(e) => tracing::warn!(error = %e, "ignoring COMMUNITY_ID_ENCODING"),
            }
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("community-id")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
