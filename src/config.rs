use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    assets::decode::DEFAULT_JPEG_QUALITY,
    foundation::error::{BearError, BearResult},
};

/// Default listen address.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Secondary search directory. Absent or empty means the working directory;
    /// relative paths are taken from the working directory.
    pub directory: Option<PathBuf>,
    /// Quality of the encoded bear, 1..=100.
    pub jpeg_quality: u8,
    /// `tracing-subscriber` filter directive.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            directory: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            log: "info".to_string(),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Clone, Debug, Default)]
pub struct SettingsOverrides {
    /// Replaces [`Settings::bind`].
    pub bind: Option<SocketAddr>,
    /// Replaces [`Settings::directory`].
    pub directory: Option<PathBuf>,
    /// Replaces [`Settings::jpeg_quality`].
    pub jpeg_quality: Option<u8>,
    /// Replaces [`Settings::log`].
    pub log: Option<String>,
}

impl Settings {
    /// Parse settings from a JSON document; missing keys keep their defaults.
    pub fn from_json_str(s: &str) -> BearResult<Self> {
        serde_json::from_str(s).map_err(|e| BearError::config(format!("invalid settings: {e}")))
    }

    /// Read settings from a JSON file.
    pub fn from_path(path: &Path) -> BearResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings from '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Load the optional settings file, then apply overrides and validate.
    pub fn load(file: Option<&Path>, overrides: SettingsOverrides) -> BearResult<Self> {
        let mut settings = match file {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    /// Replace every field that has an override.
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(directory) = overrides.directory {
            self.directory = Some(directory);
        }
        if let Some(q) = overrides.jpeg_quality {
            self.jpeg_quality = q;
        }
        if let Some(log) = overrides.log {
            self.log = log;
        }
    }

    /// Reject values the pipeline cannot honor.
    pub fn validate(&self) -> BearResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BearError::config(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.log.trim().is_empty() {
            return Err(BearError::config("log filter must be non-empty"));
        }
        Ok(())
    }

    /// Root of the configured-directory tier, given the captured working directory.
    pub fn base_dir(&self, working_dir: &Path) -> PathBuf {
        match &self.directory {
            Some(dir) if !dir.as_os_str().is_empty() => working_dir.join(dir),
            _ => working_dir.to_path_buf(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
