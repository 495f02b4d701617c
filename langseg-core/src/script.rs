//! Character and script predicates
//!
//! Small O(1) checks used by the clause splitter and the CJK
//! disambiguation heuristic. The ranges follow the Unicode block
//! definitions; nothing here depends on the configured filter set.

/// Marks that end a sentence (or close a quotation) for the purpose of
/// deciding whether the previous span still gives usable context.
const SENTENCE_FINAL: [char; 15] = [
    '“', '”', '‘', '’', '"', '\'', ':', '：', '。', '.', '！', '!', '?', '．', '？',
];

/// CJK Unified Ideographs (U+4E00..=U+9FFF)
#[inline]
pub fn is_han(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

/// Hiragana or Katakana (U+3040..=U+30FF)
#[inline]
pub fn is_kana(ch: char) -> bool {
    ('\u{3040}'..='\u{30FF}').contains(&ch)
}

/// Precomposed Hangul syllables (U+AC00..=U+D7A3)
#[inline]
pub fn is_hangul(ch: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&ch)
}

/// Word character: any alphanumeric code point or underscore
#[inline]
pub fn is_word(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Clause punctuation: neither a word character nor whitespace
#[inline]
pub fn is_punctuation(ch: char) -> bool {
    !is_word(ch) && !ch.is_whitespace()
}

/// Whether `ch` is one of the sentence-final marks
#[inline]
pub fn is_sentence_final(ch: char) -> bool {
    SENTENCE_FINAL.contains(&ch)
}

/// True if any character of `text` is a Han ideograph
pub fn contains_han(text: &str) -> bool {
    text.chars().any(is_han)
}

/// True if any character of `text` is Hiragana or Katakana
pub fn contains_kana(text: &str) -> bool {
    text.chars().any(is_kana)
}

/// Last non-whitespace character of `text` is sentence-final
pub fn ends_with_sentence_final(text: &str) -> bool {
    text.chars()
        .rev()
        .find(|ch| !ch.is_whitespace())
        .is_some_and(is_sentence_final)
}

/// Remove punctuation, keeping word characters and whitespace.
///
/// This is the string handed to the statistical classifier.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|&ch| !is_punctuation(ch)).collect()
}

/// Insert a space before every ASCII capital that follows a word
/// character, trim hyphens from both ends and append one space.
///
/// `"iPhone"` becomes `"i Phone "`, `"LCD"` becomes `"L C D "`.
pub fn space_capitals(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if ch.is_ascii_uppercase() && prev.is_some_and(is_word) {
            spaced.push(' ');
        }
        spaced.push(ch);
        prev = Some(ch);
    }

    let mut spaced = spaced.trim_matches('-').to_string();
    spaced.push(' ');
    spaced
}
