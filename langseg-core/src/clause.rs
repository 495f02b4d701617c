//! Clause splitting and CJK disambiguation
//!
//! Unprotected text is cut at punctuation runs into clauses. A clause that
//! is punctuation only (or is followed by one) is carried forward into its
//! neighbour, so every classified clause owns its trailing punctuation.
//!
//! Short Han-only clauses are where Chinese and Japanese are hardest to
//! tell apart, so the classifier's guess is overridden there using the
//! previous span, sentence-final punctuation and Kana presence.

use std::ops::Range;

use crate::builder::SegmentBuilder;
use crate::classifier::{guess_language, Classifier};
use crate::script::{
    contains_han, contains_kana, ends_with_sentence_final, is_punctuation, is_word,
};
use crate::tag::{LangTag, CHINESE, JAPANESE};

/// Unprotected text together with the numeric runs protected inside it.
///
/// Numeric runs behave like word characters: they never split a clause,
/// never count as punctuation and are left out of the classifier input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainText {
    text: String,
    numbers: Vec<Range<usize>>,
}

/// One clause of a plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause<'a> {
    /// Clause text including its trailing punctuation and numbers
    pub text: &'a str,
    /// Classifier input: numbers and punctuation removed
    pub cleaned: String,
    /// Last clause of the plain text
    pub end_of_chunk: bool,
}

impl PlainText {
    /// Create from text with no numeric runs
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numbers: Vec::new(),
        }
    }

    /// Append unprotected text
    pub fn push_literal(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append a protected numeric run
    pub fn push_number(&mut self, text: &str) {
        let start = self.text.len();
        self.text.push_str(text);
        self.numbers.push(start..self.text.len());
    }

    /// The full text, numbers restored inline
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True if nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Reset for reuse
    pub fn clear(&mut self) {
        self.text.clear();
        self.numbers.clear();
    }

    #[inline]
    fn in_number(&self, pos: usize) -> bool {
        // Ranges are pushed in order and never overlap
        let index = self.numbers.partition_point(|range| range.end <= pos);
        self.numbers
            .get(index)
            .is_some_and(|range| range.start <= pos)
    }

    fn is_split_point(&self, pos: usize, ch: char) -> bool {
        is_punctuation(ch) && !self.in_number(pos)
    }

    /// Alternating text and punctuation runs, starting and ending with a
    /// (possibly empty) text run.
    fn runs(&self) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut start = 0;
        let mut in_punct = false;

        for (pos, ch) in self.text.char_indices() {
            let punct = self.is_split_point(pos, ch);
            if punct != in_punct {
                runs.push(start..pos);
                start = pos;
                in_punct = punct;
            }
        }
        runs.push(start..self.text.len());

        if in_punct {
            let end = self.text.len();
            runs.push(end..end);
        }

        runs
    }

    /// No word characters (numbers count as words) in `range`
    fn is_punctuation_only(&self, range: &Range<usize>) -> bool {
        self.text[range.clone()]
            .char_indices()
            .all(|(offset, ch)| !self.in_number(range.start + offset) && !is_word(ch))
    }

    fn cleaned(&self, range: &Range<usize>) -> String {
        self.text[range.clone()]
            .char_indices()
            .filter(|&(offset, ch)| !self.in_number(range.start + offset) && !is_punctuation(ch))
            .map(|(_, ch)| ch)
            .collect()
    }

    /// Split into clauses, merging punctuation forward.
    pub fn clauses(&self) -> Vec<Clause<'_>> {
        let mut lines = self.runs();
        let last = lines.len().saturating_sub(1);
        let mut clauses = Vec::new();

        for index in 0..lines.len() {
            let line = lines[index].clone();
            if line.is_empty() {
                continue;
            }

            let end_of_chunk = index >= last;
            if !end_of_chunk {
                let next = lines[index + 1].clone();
                if self.is_punctuation_only(&line) || self.is_punctuation_only(&next) {
                    lines[index + 1] = line.start..next.end;
                    continue;
                }
            }

            clauses.push(Clause {
                text: &self.text[line.clone()],
                cleaned: self.cleaned(&line),
                end_of_chunk,
            });
        }

        clauses
    }
}

/// Classify every clause of `plain` and append it to `builder`.
pub(crate) fn segment_plain<C: Classifier + ?Sized>(
    plain: &PlainText,
    classifier: &C,
    builder: &mut SegmentBuilder<'_>,
    short_han_max_chars: usize,
) {
    for clause in plain.clauses() {
        let guess = guess_language(classifier, &clause.cleaned);
        let tag = disambiguate(&clause, guess, builder, short_han_max_chars);
        tracing::trace!(clause = clause.text, tag = %tag, "clause classified");
        builder.add(tag, clause.text);
    }
}

/// Apply the short-Han override to the classifier's guess.
pub(crate) fn disambiguate(
    clause: &Clause<'_>,
    guess: String,
    builder: &SegmentBuilder<'_>,
    short_han_max_chars: usize,
) -> LangTag {
    let length = clause.cleaned.chars().count();
    if length > short_han_max_chars || !contains_han(&clause.cleaned) {
        return LangTag::resolved(guess);
    }

    if clause.end_of_chunk || length <= 1 {
        return LangTag::resolved(CHINESE);
    }

    // The previous span counts as context only if it agrees with the
    // guess and does not close a sentence.
    let context = builder
        .last_span()
        .filter(|span| {
            !span.language.is_empty()
                && span.language == guess
                && !ends_with_sentence_final(&span.text)
        })
        .map(|span| span.language.as_str());

    if contains_kana(&clause.cleaned) {
        LangTag::resolved(JAPANESE)
    } else {
        match context {
            None => LangTag::ambiguous(guess, JAPANESE),
            Some(JAPANESE) => LangTag::resolved(JAPANESE),
            Some(_) => LangTag::resolved(CHINESE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LanguageFilter;

    fn clause_texts(plain: &PlainText) -> Vec<(&str, bool)> {
        plain
            .clauses()
            .into_iter()
            .map(|c| (c.text, c.end_of_chunk))
            .collect()
    }

    #[test]
    fn test_clauses_keep_trailing_punctuation() {
        let plain = PlainText::new("你好，世界。");
        assert_eq!(
            clause_texts(&plain),
            vec![("你好，", false), ("世界。", true)]
        );
    }

    #[test]
    fn test_leading_punctuation_merges_forward() {
        let plain = PlainText::new("……你好");
        assert_eq!(clause_texts(&plain), vec![("……你好", true)]);
    }

    #[test]
    fn test_single_clause_is_end_of_chunk() {
        let plain = PlainText::new("你好");
        let clauses = plain.clauses();
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].end_of_chunk);
        assert_eq!(clauses[0].cleaned, "你好");
    }

    #[test]
    fn test_punctuation_only_text() {
        let plain = PlainText::new("。。。");
        assert_eq!(clause_texts(&plain), vec![("。。。", true)]);
        assert!(PlainText::new("").clauses().is_empty());
    }

    #[test]
    fn test_numbers_do_not_split() {
        let mut plain = PlainText::new("价格");
        plain.push_number("3.5，");
        plain.push_literal("很便宜。");

        let clauses = plain.clauses();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, "价格3.5，很便宜。");
        assert_eq!(clauses[0].cleaned, "价格很便宜");
    }

    #[test]
    fn test_cleaned_keeps_whitespace() {
        let plain = PlainText::new(" 此次发布会，");
        assert_eq!(plain.clauses()[0].cleaned, " 此次发布会");
    }

    fn clause(text: &'static str, end_of_chunk: bool) -> Clause<'static> {
        Clause {
            text,
            cleaned: crate::script::strip_punctuation(text),
            end_of_chunk,
        }
    }

    #[test]
    fn test_disambiguate_long_clause_keeps_guess() {
        let filter = LanguageFilter::accept_all();
        let builder = SegmentBuilder::new(&filter);
        let tag = disambiguate(&clause("春は桜の季節です", false), "ja".into(), &builder, 3);
        assert_eq!(tag, LangTag::resolved("ja"));
    }

    #[test]
    fn test_disambiguate_end_of_chunk_is_chinese() {
        let filter = LanguageFilter::accept_all();
        let builder = SegmentBuilder::new(&filter);
        let tag = disambiguate(&clause("東京。", true), "ja".into(), &builder, 3);
        assert_eq!(tag, LangTag::resolved("zh"));

        let tag = disambiguate(&clause("好，", false), "ja".into(), &builder, 3);
        assert_eq!(tag, LangTag::resolved("zh"));
    }

    #[test]
    fn test_disambiguate_without_context_is_ambiguous() {
        let filter = LanguageFilter::accept_all();
        let builder = SegmentBuilder::new(&filter);
        let tag = disambiguate(&clause("東京，", false), "zh".into(), &builder, 3);
        assert_eq!(tag, LangTag::ambiguous("zh", "ja"));
    }

    #[test]
    fn test_disambiguate_kana_forces_japanese() {
        let filter = LanguageFilter::accept_all();
        let builder = SegmentBuilder::new(&filter);
        let tag = disambiguate(&clause("東は，", false), "zh".into(), &builder, 3);
        assert_eq!(tag, LangTag::resolved("ja"));
    }

    #[test]
    fn test_disambiguate_with_context() {
        let filter = LanguageFilter::accept_all();

        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::resolved("ja"), "あなたの");
        let tag = disambiguate(&clause("先生，", false), "ja".into(), &builder, 3);
        assert_eq!(tag, LangTag::resolved("ja"));

        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::resolved("zh"), "我们的");
        let tag = disambiguate(&clause("先生，", false), "zh".into(), &builder, 3);
        assert_eq!(tag, LangTag::resolved("zh"));

        // A sentence-final previous span gives no context
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::resolved("zh"), "我们走吧。");
        let tag = disambiguate(&clause("先生，", false), "zh".into(), &builder, 3);
        assert_eq!(tag, LangTag::ambiguous("zh", "ja"));
    }

    #[test]
    fn test_unknown_previous_language_is_no_context() {
        let filter = LanguageFilter::accept_all();
        let mut builder = SegmentBuilder::new(&filter);
        builder.add(LangTag::resolved(""), "かな文字列です");
        let tag = disambiguate(&clause("先生，", false), String::new(), &builder, 3);
        assert_eq!(tag, LangTag::ambiguous("", "ja"));
    }

    #[test]
    fn test_many_numbers() {
        let mut plain = PlainText::default();
        for _ in 0..500 {
            plain.push_literal("价格");
            plain.push_number("3.5，");
        }
        plain.push_literal("。");

        let clauses = plain.clauses();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, plain.as_str());
        assert_eq!(clauses[0].cleaned, "价格".repeat(500));

        assert!(!plain.in_number(0));
        assert!(plain.in_number("价格".len()));
        assert!(plain.in_number(plain.as_str().len() - "，。".len()));
        assert!(!plain.in_number(plain.as_str().len() - "。".len()));
    }
}
