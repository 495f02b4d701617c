//! Per-language character statistics
//!
//! Latin-script text is weighted at half its character length so that a
//! word-ish count compares with CJK character counts.

use crate::tag::{CHINESE, ENGLISH};

/// Accumulated weight per language, in first-encountered order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangCounts {
    entries: Vec<(String, usize)>,
}

impl LangCounts {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight contributed by `text` under `language`
    pub fn weight(language: &str, text: &str) -> usize {
        let chars = text.chars().count();
        if language == ENGLISH {
            chars / 2
        } else {
            chars
        }
    }

    /// Add the weight of `text` to `language`
    pub fn record(&mut self, language: &str, text: &str) {
        let weight = Self::weight(language, text);
        match self.entries.iter_mut().find(|(code, _)| code == language) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((language.to_string(), weight)),
        }
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight recorded for `language`, if any
    pub fn get(&self, language: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, weight)| *weight)
    }

    /// Languages by descending weight, ties in first-encountered order.
    ///
    /// An empty table ranks as a single `("zh", 0)` entry.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        if self.entries.is_empty() {
            return vec![(CHINESE.to_string(), 0)];
        }

        let mut ranked = self.entries.clone();
        // Stable sort keeps insertion order among equal weights
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The first ranked entry
    pub fn dominant(&self) -> (String, usize) {
        self.ranked()
            .into_iter()
            .next()
            .unwrap_or_else(|| (CHINESE.to_string(), 0))
    }
}
