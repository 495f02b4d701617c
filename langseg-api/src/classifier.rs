//! Whatlang-backed language classifier
//!
//! Uses the whatlang crate's trigram and script detection. Codes are
//! reported in ISO 639-1 form where the pipeline has a name for them and
//! as whatlang's ISO 639-3 code otherwise.

use langseg_core::{Classifier, Result};
use whatlang::{Detector, Lang};

/// Statistical classifier over whatlang
#[derive(Debug, Clone, Default)]
pub struct WhatlangClassifier {
    allowlist: Option<Vec<Lang>>,
}

impl WhatlangClassifier {
    /// Detect among every language whatlang knows
    pub fn new() -> Self {
        Self { allowlist: None }
    }

    /// Restrict detection to `languages`
    pub fn with_allowlist(languages: Vec<Lang>) -> Self {
        Self {
            allowlist: Some(languages),
        }
    }

    /// Short code for `lang`
    pub fn code(lang: Lang) -> &'static str {
        match lang {
            Lang::Cmn => "zh",
            Lang::Jpn => "ja",
            Lang::Kor => "ko",
            Lang::Eng => "en",
            Lang::Fra => "fr",
            Lang::Deu => "de",
            Lang::Spa => "es",
            Lang::Rus => "ru",
            other => other.code(),
        }
    }
}

impl Classifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Result<String> {
        let info = match &self.allowlist {
            Some(languages) => Detector::with_allowlist(languages.clone()).detect(text),
            None => whatlang::detect(text),
        };
        let code = info.map_or("", |info| Self::code(info.lang()));
        Ok(code.to_string())
    }
}
