//! Public API for langseg mixed-language segmentation
//!
//! This crate pairs the segmentation core with a whatlang-backed
//! classifier and exposes a small, stable surface: the [`LangSegment`]
//! processor for callers that want their own instance, and module-level
//! functions that share one process-wide instance behind a mutex.

#![warn(missing_docs)]

pub mod classifier;
pub mod dto;
pub mod error;

use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use langseg_core::Segmenter;

// Re-export key types
pub use classifier::WhatlangClassifier;
#[cfg(feature = "serde")]
pub use dto::{counts_to_json, spans_to_json};
pub use dto::{LangCount, LangCountDTO, Span, SpanDTO};
pub use error::{ApiError, Result};
pub use langseg_core::{Classifier, SegmenterConfig, SegmenterConfigBuilder};

/// Main entry point for mixed-language segmentation
#[derive(Debug)]
pub struct LangSegment {
    inner: Segmenter<WhatlangClassifier>,
}

impl Default for LangSegment {
    fn default() -> Self {
        Self::new()
    }
}

impl LangSegment {
    /// Create a processor with the default configuration
    pub fn new() -> Self {
        Self {
            inner: Segmenter::new(WhatlangClassifier::new()),
        }
    }

    /// Create a processor with a custom configuration
    pub fn with_config(config: SegmenterConfig) -> Result<Self> {
        Self::with_classifier(WhatlangClassifier::new(), config)
    }

    /// Create a processor with a preconfigured classifier
    pub fn with_classifier(classifier: WhatlangClassifier, config: SegmenterConfig) -> Result<Self> {
        let inner = Segmenter::with_config(classifier, config)?;
        Ok(Self { inner })
    }

    /// Create a processor from a TOML configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = SegmenterConfig::from_file(path)?;
        Self::with_config(config)
    }

    /// Replace the filter set
    pub fn set_filters<I, S>(&mut self, codes: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|code| code.as_ref().trim().to_string())
            .collect();
        if let Some(index) = codes.iter().position(String::is_empty) {
            return Err(ApiError::Config(format!(
                "filter code at index {index} is empty"
            )));
        }

        self.inner.set_filters(codes);
        Ok(())
    }

    /// The current filter set
    pub fn get_filters(&self) -> Vec<String> {
        self.inner.filters().to_vec()
    }

    /// Segment `text` into language-tagged spans
    pub fn get_spans(&mut self, text: &str) -> Vec<Span> {
        self.inner.get_spans(text).iter().map(Span::from).collect()
    }

    /// Same as [`LangSegment::get_spans`]
    pub fn classify(&mut self, text: &str) -> Vec<Span> {
        self.get_spans(text)
    }

    /// Ranked language weights of the last parse
    pub fn get_counts(&self) -> Vec<LangCount> {
        self.inner.counts().into_iter().map(LangCount::from).collect()
    }

    /// Heaviest language of the last parse
    pub fn dominant_language(&self) -> String {
        self.inner.dominant_language()
    }

    /// Drop the memoised parse
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// The active configuration
    pub fn config(&self) -> &SegmenterConfig {
        self.inner.config()
    }
}

static DEFAULT: OnceLock<Mutex<LangSegment>> = OnceLock::new();

/// Lock the shared processor. A panic inside an earlier call cannot leave
/// it half-parsed, so a poisoned lock is recovered.
fn shared() -> MutexGuard<'static, LangSegment> {
    DEFAULT
        .get_or_init(|| Mutex::new(LangSegment::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Replace the shared processor's filter set
pub fn set_filters<I, S>(codes: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    shared().set_filters(codes)
}

/// The shared processor's filter set
pub fn get_filters() -> Vec<String> {
    shared().get_filters()
}

/// Segment `text` with the shared processor
pub fn get_spans(text: &str) -> Vec<Span> {
    shared().get_spans(text)
}

/// Same as [`get_spans`]
pub fn classify(text: &str) -> Vec<Span> {
    shared().classify(text)
}

/// Ranked language weights of the shared processor's last parse
pub fn get_counts() -> Vec<LangCount> {
    shared().get_counts()
}

/// Heaviest language of the shared processor's last parse
pub fn dominant_language() -> String {
    shared().dominant_language()
}
