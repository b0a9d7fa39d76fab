//! Navigator tuning: animation timings, cache size, URL shape, request tagging and glyphs.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! fade_out_ms = 150
//! prefetch_capacity = 20
//!
//! [icons]
//! folder_open = "-"
//! folder_closed = "+"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use core_types::Millis;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestHeader {
    pub name: String,
    pub value: String,
}

impl Default for RequestHeader {
    fn default() -> Self {
        Self {
            name: "X-Requested-With".into(),
            value: "XMLHttpRequest".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub folder_open: String,
    pub folder_closed: String,
    pub file_active: String,
    pub file_idle: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            folder_open: "📂".into(),
            folder_closed: "📁".into(),
            file_active: "▶".into(),
            file_idle: "📝".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Fade-out played before content is resolved.
    pub fade_out_ms: Millis,
    /// How long the fade-in marker stays on the patched region.
    pub fade_in_ms: Millis,
    /// Delay before a natively opened folder gets its open glyph.
    pub icon_open_delay_ms: Millis,
    /// Folder close animation; the folder closes when it elapses.
    pub close_duration_ms: Millis,
    /// Per-child slide animation inside a closing folder.
    pub item_slide_ms: Millis,
    /// Extra start delay per child index inside a closing folder.
    pub item_stagger_ms: Millis,
    /// Start delay per folder position for expand/collapse all.
    pub bulk_stagger_ms: Millis,
    /// Delay before the keyboard-selected entry is scrolled into view.
    pub reveal_delay_ms: Millis,
    pub prefetch_capacity: usize,
    /// Path prefix of project pages; the next segment is the project id.
    pub project_prefix: String,
    pub request_header: RequestHeader,
    pub icons: IconConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            fade_out_ms: 200,
            fade_in_ms: 300,
            icon_open_delay_ms: 10,
            close_duration_ms: 250,
            item_slide_ms: 200,
            item_stagger_ms: 20,
            bulk_stagger_ms: 50,
            reveal_delay_ms: 100,
            prefetch_capacity: 10,
            project_prefix: "/md/".into(),
            request_header: RequestHeader::default(),
            icons: IconConfig::default(),
        }
    }
}

impl NavConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: NavConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.prefetch_capacity == 0 {
            return Err(ConfigError::Invalid("prefetch_capacity must be at least 1".into()));
        }
        if !self.project_prefix.starts_with('/') || !self.project_prefix.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "project_prefix must start and end with '/', got {:?}",
                self.project_prefix
            )));
        }
        if self.request_header.name.trim().is_empty() {
            return Err(ConfigError::Invalid("request_header.name is empty".into()));
        }
        Ok(())
    }

    /// `animation` value for the content region of a closing folder.
    pub fn folder_slide_animation(&self) -> String {
        format!(
            "folderSlideUp {}s cubic-bezier(0.36, 0, 0.66, -0.56) forwards",
            seconds(self.close_duration_ms)
        )
    }

    /// `animation` value for each child of a closing folder.
    pub fn item_slide_animation(&self) -> String {
        format!(
            "itemSlideUp {}s cubic-bezier(0.36, 0, 0.66, -0.56) forwards",
            seconds(self.item_slide_ms)
        )
    }

    /// `animation-delay` value for the child at `index`.
    pub fn item_delay(&self, index: usize) -> String {
        format!("{}s", seconds(self.item_stagger_ms * index as Millis))
    }
}

fn seconds(ms: Millis) -> f64 {
    ms as f64 / 1000.0
}
