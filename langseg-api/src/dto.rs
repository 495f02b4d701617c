//! Data Transfer Objects for API

use langseg_core::Span as CoreSpan;

#[cfg(feature = "serde")]
use crate::error::Result;

/// A language-tagged piece of the input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanDTO {
    /// Language code (`zh`, `ja`, `en`, `ko`, ...); empty if unknown
    pub language: String,
    /// Span text
    pub text: String,
}

impl SpanDTO {
    /// Create a new span DTO
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

impl From<CoreSpan> for SpanDTO {
    fn from(span: CoreSpan) -> Self {
        Self {
            language: span.language,
            text: span.text,
        }
    }
}

impl From<&CoreSpan> for SpanDTO {
    fn from(span: &CoreSpan) -> Self {
        Self::new(span.language.as_str(), span.text.as_str())
    }
}

/// Type alias for the span DTO
pub type Span = SpanDTO;

/// Accumulated weight of one language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LangCountDTO {
    /// Language code
    pub language: String,
    /// Character weight (English counted at half length)
    pub weight: usize,
}

impl LangCountDTO {
    /// Create a new count DTO
    pub fn new(language: impl Into<String>, weight: usize) -> Self {
        Self {
            language: language.into(),
            weight,
        }
    }
}

impl From<(String, usize)> for LangCountDTO {
    fn from((language, weight): (String, usize)) -> Self {
        Self { language, weight }
    }
}

/// Type alias for the count DTO
pub type LangCount = LangCountDTO;

/// Serialize spans as a JSON array of `{"language", "text"}` objects
#[cfg(feature = "serde")]
pub fn spans_to_json(spans: &[Span]) -> Result<String> {
    Ok(serde_json::to_string(spans)?)
}

/// Serialize counts as a JSON array of `{"language", "weight"}` objects
#[cfg(feature = "serde")]
pub fn counts_to_json(counts: &[LangCount]) -> Result<String> {
    Ok(serde_json::to_string(counts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_core_span() {
        let core = CoreSpan::new("ja", "佐々木");
        assert_eq!(SpanDTO::from(&core), SpanDTO::new("ja", "佐々木"));
        assert_eq!(SpanDTO::from(core), SpanDTO::new("ja", "佐々木"));
    }

    #[test]
    fn test_from_count_pair() {
        let count = LangCountDTO::from(("zh".to_string(), 51));
        assert_eq!(count, LangCountDTO::new("zh", 51));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_shape() {
        let json = spans_to_json(&[Span::new("zh", "你好")]).unwrap();
        assert_eq!(json, r#"[{"language":"zh","text":"你好"}]"#);

        let json = counts_to_json(&[LangCount::new("en", 3)]).unwrap();
        assert_eq!(json, r#"[{"language":"en","weight":3}]"#);
    }
}
