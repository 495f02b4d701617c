//! Language filter
//!
//! Drops spans whose language is outside the accepted set. The filter
//! only acts on committed spans; the classifier never sees it.

use crate::span::Span;

/// First-entry codes that accept every language
const WILDCARDS: [&str; 6] = ["all", "alls", "mix", "mixs", "auto", "autos"];

/// Separator for combined first entries such as `zh_ja_en`
const COMBINED_SEPARATOR: char = '_';

/// Ordered set of accepted language codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFilter {
    codes: Vec<String>,
}

impl LanguageFilter {
    /// Create from an ordered list of codes.
    ///
    /// An empty list, or a first entry of `all` / `mix` / `auto`, accepts
    /// everything. The first entry may also combine several codes with
    /// underscores (`zh_ja_en`).
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|code| code.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// A filter that accepts every language
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// The configured codes, in order
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Whether every language passes
    pub fn is_wildcard(&self) -> bool {
        match self.codes.first() {
            None => true,
            Some(first) => WILDCARDS
                .iter()
                .any(|wildcard| first.eq_ignore_ascii_case(wildcard)),
        }
    }

    /// Whether a span in `language` is kept.
    ///
    /// Codes containing `?` and the empty (unknown) code always pass.
    pub fn accepts(&self, language: &str) -> bool {
        if self.is_wildcard() || language.is_empty() || language.contains('?') {
            return true;
        }

        let exact = self
            .codes
            .iter()
            .any(|code| code.eq_ignore_ascii_case(language));

        exact
            || self.codes.first().is_some_and(|first| {
                first
                    .split(COMBINED_SEPARATOR)
                    .any(|code| code.eq_ignore_ascii_case(language))
            })
    }

    /// Drop rejected spans and merge neighbours that become adjacent
    pub fn apply(&self, spans: &[Span]) -> Vec<Span> {
        let mut kept: Vec<Span> = Vec::with_capacity(spans.len());

        for span in spans.iter().filter(|span| self.accepts(&span.language)) {
            match kept.last_mut() {
                Some(last) if last.language == span.language => last.text.push_str(&span.text),
                _ => kept.push(span.clone()),
            }
        }

        kept
    }
}
