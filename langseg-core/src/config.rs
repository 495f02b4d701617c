//! Segmenter configuration

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

const EMBEDDED_DEFAULT: &str = include_str!("../configs/default.toml");

static EMBEDDED: OnceLock<SegmenterConfig> = OnceLock::new();

/// Filter set used when a document omits `filters`
pub const DEFAULT_FILTERS: [&str; 4] = ["zh", "en", "ja", "ko"];

/// Short-Han bound used when a document omits `short_han_max_chars`
pub const DEFAULT_SHORT_HAN_MAX_CHARS: usize = 3;

fn default_filters() -> Vec<String> {
    DEFAULT_FILTERS.iter().map(|code| code.to_string()).collect()
}

fn default_short_han_max_chars() -> usize {
    DEFAULT_SHORT_HAN_MAX_CHARS
}

/// Tunables for a [`Segmenter`](crate::Segmenter).
///
/// [`Default`] is the configuration embedded from `configs/default.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmenterConfig {
    /// Accepted language codes, in priority order
    #[serde(default = "default_filters")]
    pub filters: Vec<String>,
    /// Han-only clauses at most this long are disambiguated heuristically
    #[serde(default = "default_short_han_max_chars")]
    pub short_han_max_chars: usize,
    /// Emit protected numbers as their own spans
    #[serde(default)]
    pub dispatch_numbers: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::embedded().clone()
    }
}

impl SegmenterConfig {
    /// The configuration shipped with the crate, parsed once
    pub fn embedded() -> &'static Self {
        EMBEDDED.get_or_init(|| {
            Self::from_toml_str(EMBEDDED_DEFAULT)
                .expect("Failed to load embedded segmenter config")
        })
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SegmenterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CoreError::Config(msg) => {
                CoreError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.short_han_max_chars == 0 {
            tracing::warn!("rejected configuration: short_han_max_chars is zero");
            return Err(CoreError::Config(
                "short_han_max_chars must be at least 1".to_string(),
            ));
        }

        if let Some(index) = self.filters.iter().position(|code| code.trim().is_empty()) {
            tracing::warn!(index, "rejected configuration: empty filter code");
            return Err(CoreError::Config(format!(
                "filter code at index {index} is empty"
            )));
        }

        Ok(())
    }

    /// Create a builder starting from the defaults
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::default()
    }
}

/// Fluent builder for [`SegmenterConfig`]
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    config: SegmenterConfig,
}

impl SegmenterConfigBuilder {
    /// Replace the filter set
    pub fn filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.filters = filters.into_iter().map(Into::into).collect();
        self
    }

    /// Set the short-Han threshold
    pub fn short_han_max_chars(mut self, max: usize) -> Self {
        self.config.short_han_max_chars = max;
        self
    }

    /// Toggle the numeric span channel
    pub fn dispatch_numbers(mut self, enabled: bool) -> Self {
        self.config.dispatch_numbers = enabled;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<SegmenterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
