//! Statistical language classifier seam
//!
//! The pipeline treats language identification as a black box: cleaned
//! text in, best-guess language code out. Adapters for real models live
//! outside this crate; [`ScriptClassifier`] is a model-free fallback that
//! decides by Unicode script alone.

use std::sync::Arc;

use crate::error::Result;
use crate::script::{is_han, is_hangul, is_kana};
use crate::tag::{CHINESE, ENGLISH, JAPANESE, KOREAN};

/// Best-effort language identification for already cleaned text
pub trait Classifier {
    /// Return a short language code (`zh`, `ja`, `en`, ...) for `text`.
    ///
    /// An empty string means "unknown".
    fn classify(&self, text: &str) -> Result<String>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, text: &str) -> Result<String> {
        (**self).classify(text)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, text: &str) -> Result<String> {
        (**self).classify(text)
    }
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn classify(&self, text: &str) -> Result<String> {
        (**self).classify(text)
    }
}

/// Ask `classifier` for a lowercase code, degrading failures to "unknown".
pub(crate) fn guess_language<C: Classifier + ?Sized>(classifier: &C, text: &str) -> String {
    match classifier.classify(text) {
        Ok(code) => code.trim().to_lowercase(),
        Err(e) => {
            tracing::warn!(error = %e, text, "classifier failed, language left unknown");
            String::new()
        }
    }
}

/// Script-counting classifier.
///
/// Any Kana makes the text Japanese; otherwise the most frequent of
/// Han, Hangul and Latin letters wins, earlier scripts winning ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptClassifier;

impl ScriptClassifier {
    /// Create a new script classifier
    pub fn new() -> Self {
        Self
    }

    /// Infallible variant of [`Classifier::classify`]
    pub fn detect(&self, text: &str) -> &'static str {
        let mut han = 0usize;
        let mut hangul = 0usize;
        let mut latin = 0usize;

        for ch in text.chars() {
            if is_kana(ch) {
                return JAPANESE;
            } else if is_han(ch) {
                han += 1;
            } else if is_hangul(ch) {
                hangul += 1;
            } else if ch.is_ascii_alphabetic() {
                latin += 1;
            }
        }

        [(CHINESE, han), (KOREAN, hangul), (ENGLISH, latin)]
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .fold(None, |best: Option<(&'static str, usize)>, candidate| match best {
                Some(current) if current.1 >= candidate.1 => Some(current),
                _ => Some(candidate),
            })
            .map_or("", |(code, _)| code)
    }
}

impl Classifier for ScriptClassifier {
    fn classify(&self, text: &str) -> Result<String> {
        Ok(self.detect(text).to_string())
    }
}
