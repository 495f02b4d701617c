//! Output span type

use serde::{Deserialize, Serialize};

/// A maximal run of text assigned one resolved language code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Language code; empty when the classifier could not decide
    pub language: String,
    /// Span text (English spans carry capital spacing)
    pub text: String,
}

impl Span {
    /// Create a new span
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}
