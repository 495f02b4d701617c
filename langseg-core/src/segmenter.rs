//! Pipeline orchestration
//!
//! A [`Segmenter`] owns everything one caller needs: the classifier, the
//! filter set and the memoised result of the last parse. Separate
//! instances share nothing and may run on different threads.

use crate::builder::SegmentBuilder;
use crate::classifier::{guess_language, Classifier};
use crate::clause::{segment_plain, PlainText};
use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::filter::LanguageFilter;
use crate::protect::{protect, Chunk, Protected};
use crate::script::strip_punctuation;
use crate::span::Span;
use crate::stats::LangCounts;
use crate::tag::{LangTag, CHINESE, ENGLISH, KOREAN};

/// Result of the most recent parse, keyed on its exact input
#[derive(Debug, Clone)]
struct ParseResult {
    input: String,
    spans: Vec<Span>,
    counts: LangCounts,
}

/// Mixed-language segmenter
#[derive(Debug)]
pub struct Segmenter<C> {
    classifier: C,
    config: SegmenterConfig,
    filter: LanguageFilter,
    memo: Option<ParseResult>,
}

impl<C: Classifier> Segmenter<C> {
    /// Create a segmenter with the default configuration
    pub fn new(classifier: C) -> Self {
        let config = SegmenterConfig::default();
        Self {
            classifier,
            filter: LanguageFilter::new(&config.filters),
            config,
            memo: None,
        }
    }

    /// Create a segmenter from a validated configuration
    pub fn with_config(classifier: C, config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier,
            filter: LanguageFilter::new(&config.filters),
            config,
            memo: None,
        })
    }

    /// Replace the filter set; the next call always reparses
    pub fn set_filters<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter = LanguageFilter::new(codes);
        self.config.filters = self.filter.codes().to_vec();
        self.memo = None;
    }

    /// The current filter set
    pub fn filters(&self) -> &[String] {
        self.filter.codes()
    }

    /// The active configuration
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// The wrapped classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Segment `text` into merged, filtered spans.
    ///
    /// Blank input clears all cached state. Repeating the previous input
    /// returns the memoised result without classifying again.
    pub fn get_spans(&mut self, text: &str) -> &[Span] {
        if text.trim().is_empty() {
            self.clear();
            return &[];
        }

        let hit = self.memo.as_ref().is_some_and(|memo| memo.input == text);
        if hit {
            tracing::debug!(len = text.len(), "memoised parse reused");
        } else {
            self.memo = Some(self.parse(text));
        }

        match &self.memo {
            Some(memo) => &memo.spans,
            None => &[],
        }
    }

    /// Same as [`Segmenter::get_spans`]
    pub fn classify(&mut self, text: &str) -> &[Span] {
        self.get_spans(text)
    }

    /// Ranked `(language, weight)` pairs of the last parse
    pub fn counts(&self) -> Vec<(String, usize)> {
        match &self.memo {
            Some(memo) => memo.counts.ranked(),
            None => LangCounts::new().ranked(),
        }
    }

    /// Heaviest language of the last parse (`zh` before any parse)
    pub fn dominant_language(&self) -> String {
        match &self.memo {
            Some(memo) => memo.counts.dominant().0,
            None => CHINESE.to_string(),
        }
    }

    /// Drop the memoised parse
    pub fn clear(&mut self) {
        self.memo = None;
    }

    fn parse(&self, text: &str) -> ParseResult {
        tracing::debug!(len = text.len(), filters = ?self.filter.codes(), "parse started");

        let mut builder = SegmentBuilder::new(&self.filter);
        let mut plain = PlainText::default();

        for chunk in protect(text) {
            match chunk {
                Chunk::Literal(literal) => plain.push_literal(&literal),
                Chunk::Protected(Protected::Number(number)) if !self.config.dispatch_numbers => {
                    plain.push_number(&number);
                }
                Chunk::Protected(protected) => {
                    self.flush_plain(&mut plain, &mut builder);
                    self.dispatch(protected, &mut builder);
                }
            }
        }
        self.flush_plain(&mut plain, &mut builder);

        let (spans, counts) = builder.finish();
        tracing::debug!(spans = spans.len(), "parse finished");

        ParseResult {
            input: text.to_string(),
            spans,
            counts,
        }
    }

    fn flush_plain(&self, plain: &mut PlainText, builder: &mut SegmentBuilder<'_>) {
        if plain.is_empty() {
            return;
        }
        segment_plain(plain, &self.classifier, builder, self.config.short_han_max_chars);
        plain.clear();
    }

    fn dispatch(&self, protected: Protected, builder: &mut SegmentBuilder<'_>) {
        match protected {
            Protected::ManualTag { tag, content, .. } => {
                builder.add(LangTag::parse(&tag), &content);
            }
            Protected::Korean(text) => {
                builder.add(LangTag::resolved(KOREAN), &text);
            }
            Protected::English(text) => {
                builder.add(LangTag::resolved(ENGLISH), &text);
            }
            Protected::Number(text) => {
                let language = builder.first_language().unwrap_or(CHINESE).to_string();
                builder.add(LangTag::Resolved(language), &text);
            }
            Protected::SimpleQuote { text, inner } | Protected::StructuralQuote { text, inner } => {
                let guess = guess_language(&self.classifier, &strip_punctuation(&inner));
                builder.add(LangTag::Resolved(guess), &text);
            }
        }
    }
}
