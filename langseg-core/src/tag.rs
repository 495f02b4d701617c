//! Language tags
//!
//! A span is tagged either with one resolved language code or, while the
//! CJK heuristic cannot decide, with two candidate codes. Ambiguous tags
//! never leave the segment builder.

use std::fmt;

/// English code; spans under it get capital spacing and half weight
pub const ENGLISH: &str = "en";
/// Chinese code; default for short Han fragments and empty statistics
pub const CHINESE: &str = "zh";
/// Japanese code; second branch of every heuristic ambiguity
pub const JAPANESE: &str = "ja";
/// Korean code; assigned to protected Hangul runs
pub const KOREAN: &str = "ko";

/// Separator used by the textual form of an ambiguous tag (`zh|ja`)
pub const BRANCH_SEPARATOR: char = '|';

/// Language assigned to a span
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LangTag {
    /// A single language code (may be empty for "unknown")
    Resolved(String),
    /// One of two candidates; the first is the default resolution
    Ambiguous(String, String),
}

impl LangTag {
    /// Create a resolved tag, lowercasing the code
    pub fn resolved(code: impl AsRef<str>) -> Self {
        LangTag::Resolved(code.as_ref().to_lowercase())
    }

    /// Create an ambiguous tag; identical branches collapse to a resolved tag
    pub fn ambiguous(first: impl AsRef<str>, second: impl AsRef<str>) -> Self {
        let first = first.as_ref().to_lowercase();
        let second = second.as_ref().to_lowercase();
        if first == second {
            LangTag::Resolved(first)
        } else {
            LangTag::Ambiguous(first, second)
        }
    }

    /// Parse the textual form used by manual tags: `ja` or `zh|ja`.
    ///
    /// Only the first two non-empty branches are kept.
    pub fn parse(text: &str) -> Self {
        let mut branches = text
            .split(BRANCH_SEPARATOR)
            .map(str::trim)
            .filter(|branch| !branch.is_empty());

        match (branches.next(), branches.next()) {
            (Some(first), Some(second)) => LangTag::ambiguous(first, second),
            (Some(first), None) => LangTag::resolved(first),
            _ => LangTag::Resolved(String::new()),
        }
    }

    /// Lowercase every code and collapse identical branches
    pub fn normalize(self) -> Self {
        match self {
            LangTag::Resolved(code) => LangTag::resolved(code),
            LangTag::Ambiguous(first, second) => LangTag::ambiguous(first, second),
        }
    }

    /// Whether the tag is still undecided
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, LangTag::Ambiguous(..))
    }

    /// The default resolution: the code itself, or the first branch
    pub fn first(&self) -> &str {
        match self {
            LangTag::Resolved(code) => code,
            LangTag::Ambiguous(first, _) => first,
        }
    }

    /// Whether `code` is this tag's code or one of its branches
    pub fn admits(&self, code: &str) -> bool {
        match self {
            LangTag::Resolved(own) => own == code,
            LangTag::Ambiguous(first, second) => first == code || second == code,
        }
    }

    /// Collapse a pending ambiguous tag once the next tag is known.
    ///
    /// A resolved `next` that names one of the branches wins; anything
    /// else falls back to the first branch.
    pub fn resolve_with(&self, next: &LangTag) -> String {
        match next {
            LangTag::Resolved(code) if self.admits(code) => code.clone(),
            _ => self.first().to_string(),
        }
    }

    /// True if this is the resolved English tag
    pub fn is_english(&self) -> bool {
        matches!(self, LangTag::Resolved(code) if code == ENGLISH)
    }
}

impl fmt::Display for LangTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LangTag::Resolved(code) => write!(f, "{code}"),
            LangTag::Ambiguous(first, second) => {
                write!(f, "{first}{BRANCH_SEPARATOR}{second}")
            }
        }
    }
}
