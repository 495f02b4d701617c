//! Segment builder
//!
//! Collects tagged text into merged spans. At most one ambiguous span is
//! held back at a time; it is resolved by the next call to
//! [`SegmentBuilder::add`] or, at the end of the input, by its first
//! branch. Committed spans have passed the filter and carry a resolved
//! language only.

use crate::filter::LanguageFilter;
use crate::script::space_capitals;
use crate::span::Span;
use crate::stats::LangCounts;
use crate::tag::LangTag;

/// A span whose language is still one of two candidates
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSpan {
    tag: LangTag,
    text: String,
}

/// Accumulates spans for one parse
#[derive(Debug)]
pub struct SegmentBuilder<'a> {
    filter: &'a LanguageFilter,
    spans: Vec<Span>,
    pending: Option<PendingSpan>,
    counts: LangCounts,
}

impl<'a> SegmentBuilder<'a> {
    /// Create an empty builder committing through `filter`
    pub fn new(filter: &'a LanguageFilter) -> Self {
        Self {
            filter,
            spans: Vec::new(),
            pending: None,
            counts: LangCounts::new(),
        }
    }

    /// Add `text` under `tag`.
    ///
    /// Returns `false` without touching any state if `text` is blank.
    pub fn add(&mut self, tag: LangTag, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let tag = tag.normalize();
        let text = if tag.is_english() {
            space_capitals(text)
        } else {
            text.to_string()
        };

        if let Some(pending) = self.pending.take() {
            let language = pending.tag.resolve_with(&tag);
            tracing::trace!(
                pending = %pending.tag,
                next = %tag,
                language = language.as_str(),
                "pending span resolved"
            );
            self.commit(&language, &pending.text);
        }

        match tag {
            LangTag::Ambiguous(..) => {
                tracing::trace!(tag = %tag, text = text.as_str(), "span deferred");
                self.pending = Some(PendingSpan { tag, text });
            }
            LangTag::Resolved(language) => self.commit(&language, &text),
        }

        true
    }

    fn commit(&mut self, language: &str, text: &str) {
        if !self.filter.accepts(language) {
            tracing::trace!(language, text, "span rejected by filter");
            return;
        }

        self.counts.record(language, text);
        match self.spans.last_mut() {
            Some(last) if last.language == language => last.text.push_str(text),
            _ => self.spans.push(Span::new(language, text)),
        }
    }

    /// Most recently committed span
    pub fn last_span(&self) -> Option<&Span> {
        self.spans.last()
    }

    /// Language of the first committed span
    pub fn first_language(&self) -> Option<&str> {
        self.spans.first().map(|span| span.language.as_str())
    }

    /// Whether an ambiguous span is waiting for context
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Commit any pending span under its first branch and return the
    /// spans with their statistics.
    pub fn finish(mut self) -> (Vec<Span>, LangCounts) {
        if let Some(pending) = self.pending.take() {
            let language = pending.tag.first().to_string();
            tracing::trace!(
                pending = %pending.tag,
                language = language.as_str(),
                "pending span flushed"
            );
            self.commit(&language, &pending.text);
        }
        (self.spans, self.counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(builder: SegmentBuilder<'_>) -> Vec<(String, String)> {
        builder
            .finish()
            .0
            .into_iter()
            .map(|span| (span.language, span.text))
            .collect()
    }

    fn pair(language: &str, text: &str) -> (String, String) {
        (language.to_string(), text.to_string())
    }

    #[test]
    fn test_blank_text_is_noop() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        assert!(!builder.add(LangTag::resolved("zh"), "  \n"));
        assert!(builder.last_span().is_none());
        assert!(builder.add(LangTag::resolved("zh"), "你好"));
    }

    #[test]
    fn test_same_language_merges() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::resolved("zh"), "你好，");
        builder.add(LangTag::resolved("ZH"), "世界");
        builder.add(LangTag::resolved("ja"), "です");
        assert_eq!(
            spans(builder),
            vec![pair("zh", "你好，世界"), pair("ja", "です")]
        );
    }

    #[test]
    fn test_english_spacing_and_weight() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::resolved("en"), "iPhone");
        let (spans, counts) = builder.finish();
        assert_eq!(spans, vec![Span::new("en", "i Phone ")]);
        assert_eq!(counts.get("en"), Some(4));
    }

    #[test]
    fn test_pending_resolved_by_next_branch() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::ambiguous("zh", "ja"), "東京，");
        assert!(builder.has_pending());
        assert!(builder.last_span().is_none());

        builder.add(LangTag::resolved("ja"), "行きます。");
        assert!(!builder.has_pending());
        assert_eq!(spans(builder), vec![pair("ja", "東京，行きます。")]);
    }

    #[test]
    fn test_pending_falls_back_to_first_branch() {
        let filter = LanguageFilter::accept_all();

        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::ambiguous("zh", "ja"), "东京，");
        builder.add(LangTag::resolved("en"), "Tokyo");
        assert_eq!(
            spans(builder),
            vec![pair("zh", "东京，"), pair("en", "Tokyo ")]
        );

        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::ambiguous("zh", "ja"), "东京");
        assert_eq!(spans(builder), vec![pair("zh", "东京")]);
    }

    #[test]
    fn test_repeated_compound_stays_open() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::ambiguous("zh", "ja"), "东京。");
        builder.add(LangTag::ambiguous("zh", "ja"), "大阪，");

        // The first span settles on its default, the second waits
        assert!(builder.has_pending());
        assert_eq!(builder.last_span(), Some(&Span::new("zh", "东京。")));

        builder.add(LangTag::resolved("ja"), "行きます。");
        assert_eq!(
            spans(builder),
            vec![pair("zh", "东京。"), pair("ja", "大阪，行きます。")]
        );
    }

    #[test]
    fn test_filter_applies_to_late_commits() {
        let filter = LanguageFilter::new(["zh"]);
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::ambiguous("ja", "zh"), "東京，");
        builder.add(LangTag::resolved("ko"), "오빠");
        builder.add(LangTag::resolved("zh"), "你好");

        let (spans, counts) = builder.finish();
        assert_eq!(spans, vec![Span::new("zh", "你好")]);
        assert_eq!(counts.get("ja"), None);
        assert_eq!(counts.get("ko"), None);
    }

    #[test]
    fn test_first_language() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        assert_eq!(builder.first_language(), None);
        builder.add(LangTag::resolved("ja"), "すし");
        builder.add(LangTag::resolved("zh"), "你好");
        assert_eq!(builder.first_language(), Some("ja"));
    }
}
