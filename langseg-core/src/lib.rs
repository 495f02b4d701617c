//! Mixed-language text segmentation for speech front ends
//!
//! Splits text that mixes Chinese, Japanese, English and Korean into an
//! ordered sequence of language-tagged spans. Structured fragments (manual
//! `<lang>` tags, Hangul runs, numbers, Latin runs and quotations) are
//! protected first, the remaining text is cut into clauses for a
//! statistical classifier, and short Han-only clauses are disambiguated
//! between Chinese and Japanese from their context.
//!
//! # Architecture
//!
//! - **Protection**: ordered regex rules lift structured fragments out of the text
//! - **Clauses**: punctuation-split, classifier-tagged plain text
//! - **Builder**: merges spans, resolves ambiguous tags, filters and counts
//! - **Segmenter**: per-caller orchestration with a one-entry memo
//!
//! # Example
//!
//! ```rust
//! use langseg_core::{ScriptClassifier, Segmenter};
//!
//! let mut segmenter = Segmenter::new(ScriptClassifier::new());
//! let spans = segmenter.get_spans("你好 Hello");
//!
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].language, "zh");
//! assert_eq!(spans[1].language, "en");
//! assert_eq!(spans[1].text, "Hello ");
//! ```

pub mod builder;
pub mod classifier;
pub mod clause;
pub mod config;
pub mod error;
pub mod filter;
pub mod protect;
pub mod script;
pub mod segmenter;
pub mod span;
pub mod stats;
pub mod tag;

pub use builder::SegmentBuilder;
pub use classifier::{Classifier, ScriptClassifier};
pub use config::{SegmenterConfig, SegmenterConfigBuilder};
pub use error::{CoreError, Result};
pub use filter::LanguageFilter;
pub use protect::{protect, Chunk, Protected, RuleKind};
pub use segmenter::Segmenter;
pub use span::Span;
pub use stats::LangCounts;
pub use tag::LangTag;
