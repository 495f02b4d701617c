//! Pattern protection
//!
//! Structured sub-strings (manual tags, Hangul runs, numbers, Latin runs,
//! quotations) are lifted out of the text before the clause splitter runs,
//! so the statistical classifier never fragments them. Rules are applied
//! in precedence order and each one only searches the literal chunks left
//! behind by the rules before it, so an earlier rule always wins an
//! overlap and no match can straddle an already protected chunk.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Protection rules in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `<lang>content<lang>` or `<lang>content</lang>`
    ManualTag,
    /// Hangul run with optional leading brackets and digits
    Korean,
    /// Digits with separators; inert unless number dispatch is enabled
    Number,
    /// Latin letter run with trailing spaces and punctuation
    English,
    /// `'...'` or `"..."`
    SimpleQuote,
    /// Text between CJK brackets or curly quotes
    StructuralQuote,
}

impl RuleKind {
    /// Every rule, highest precedence first
    pub const ORDERED: [RuleKind; 6] = [
        RuleKind::ManualTag,
        RuleKind::Korean,
        RuleKind::Number,
        RuleKind::English,
        RuleKind::SimpleQuote,
        RuleKind::StructuralQuote,
    ];

    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::ManualTag => "manual-tag",
            RuleKind::Korean => "korean",
            RuleKind::Number => "number",
            RuleKind::English => "english",
            RuleKind::SimpleQuote => "simple-quote",
            RuleKind::StructuralQuote => "structural-quote",
        }
    }

    /// Whether a match covering the whole text leaves it unprotected.
    ///
    /// Only rules whose captures reconstruct the full match qualify; the
    /// tag, Hangul and Latin rules always protect.
    pub fn exempts_whole_text(&self) -> bool {
        matches!(
            self,
            RuleKind::Number | RuleKind::SimpleQuote | RuleKind::StructuralQuote
        )
    }

    fn regex(&self) -> &'static Regex {
        let patterns = PATTERNS.get_or_init(Patterns::compile);
        match self {
            RuleKind::ManualTag => &patterns.manual_tag,
            RuleKind::Korean => &patterns.korean,
            RuleKind::Number => &patterns.number,
            RuleKind::English => &patterns.english,
            RuleKind::SimpleQuote => &patterns.simple_quote,
            RuleKind::StructuralQuote => &patterns.structural_quote,
        }
    }

    fn capture(&self, caps: &Captures<'_>) -> Protected {
        let group = |index: usize| caps.get(index).map_or("", |m| m.as_str()).to_string();
        let whole = group(0);

        match self {
            RuleKind::ManualTag => Protected::ManualTag {
                tag: group(1),
                content: group(2),
                raw: whole,
            },
            RuleKind::Korean => Protected::Korean(whole),
            RuleKind::Number => Protected::Number(whole),
            RuleKind::English => Protected::English(whole),
            RuleKind::SimpleQuote => {
                // Exactly one of the two alternatives participates
                let inner = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map_or("", |m| m.as_str())
                    .to_string();
                Protected::SimpleQuote { text: whole, inner }
            }
            RuleKind::StructuralQuote => Protected::StructuralQuote {
                text: whole,
                inner: group(2),
            },
        }
    }
}

struct Patterns {
    manual_tag: Regex,
    korean: Regex,
    number: Regex,
    english: Regex,
    simple_quote: Regex,
    structural_quote: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

impl Patterns {
    fn compile() -> Self {
        // Literal patterns, exercised by test_patterns_compile
        let build = |pattern: &str| Regex::new(pattern).expect("valid protection pattern");

        Self {
            manual_tag: build(r"<([a-zA-Z|\-]*)>(.*?)</*[a-zA-Z|\-]*>"),
            korean: build(
                r#"(?:[【《（(“‘"']*(?:\d+\W*\s*)*[\x{AC00}-\x{D7A3}]+[\W\s]*)+"#,
            ),
            number: build(r"\d+\W+\d*\W*\d*"),
            english: build(r#"(?:[【《（(“‘"']*[a-zA-Z]+[\W\s]*)+"#),
            simple_quote: build(r#""(.*?)"|'(.*?)'"#),
            structural_quote: build(
                r"(\n*[【《（(“‘])([^【《（(“‘’”)）》】]+)([’”)）》】][\W\s]*\n?)",
            ),
        }
    }
}

/// A protected match with the data its handler needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protected {
    /// Manually tagged content; `tag` may be compound (`zh|ja`)
    ManualTag {
        /// Text between the angle brackets of the opening tag
        tag: String,
        /// Content between the tags
        content: String,
        /// Whole match including both tags
        raw: String,
    },
    /// Hangul run
    Korean(String),
    /// Numeric run
    Number(String),
    /// Latin run
    English(String),
    /// Straight-quoted span
    SimpleQuote {
        /// Whole match including the quotes
        text: String,
        /// Quoted content
        inner: String,
    },
    /// Bracketed or curly-quoted span
    StructuralQuote {
        /// Whole match including delimiters and trailing newline
        text: String,
        /// Content between the delimiters
        inner: String,
    },
}

impl Protected {
    /// The rule that produced this match
    pub fn kind(&self) -> RuleKind {
        match self {
            Protected::ManualTag { .. } => RuleKind::ManualTag,
            Protected::Korean(_) => RuleKind::Korean,
            Protected::Number(_) => RuleKind::Number,
            Protected::English(_) => RuleKind::English,
            Protected::SimpleQuote { .. } => RuleKind::SimpleQuote,
            Protected::StructuralQuote { .. } => RuleKind::StructuralQuote,
        }
    }

    /// The matched text exactly as it appeared in the input
    pub fn raw(&self) -> &str {
        match self {
            Protected::ManualTag { raw, .. } => raw,
            Protected::Korean(text) | Protected::Number(text) | Protected::English(text) => text,
            Protected::SimpleQuote { text, .. } | Protected::StructuralQuote { text, .. } => text,
        }
    }
}

/// One piece of protected text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Text no rule has claimed (yet)
    Literal(String),
    /// Text claimed by a rule
    Protected(Protected),
}

impl Chunk {
    /// The original text covered by this chunk
    pub fn raw(&self) -> &str {
        match self {
            Chunk::Literal(text) => text,
            Chunk::Protected(protected) => protected.raw(),
        }
    }
}

/// Run every rule over `text` and return the ordered chunk sequence.
///
/// Concatenating the raw text of the chunks reproduces `text`.
pub fn protect(text: &str) -> Vec<Chunk> {
    let mut chunks = vec![Chunk::Literal(text.to_string())];

    for rule in RuleKind::ORDERED {
        if rule.exempts_whole_text() && is_single_whole_match(rule, &chunks) {
            tracing::trace!(rule = rule.name(), "whole text matched, left unprotected");
            continue;
        }
        chunks = apply_rule(rule, chunks);
    }

    chunks
}

fn is_single_whole_match(rule: RuleKind, chunks: &[Chunk]) -> bool {
    match chunks {
        [Chunk::Literal(text)] => rule
            .regex()
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len()),
        _ => false,
    }
}

fn apply_rule(rule: RuleKind, chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut out = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        match chunk {
            Chunk::Literal(text) => split_literal(rule, &text, &mut out),
            protected => out.push(protected),
        }
    }

    out
}

fn split_literal(rule: RuleKind, text: &str, out: &mut Vec<Chunk>) {
    let mut last = 0;

    for caps in rule.regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            out.push(Chunk::Literal(text[last..whole.start()].to_string()));
        }
        tracing::trace!(rule = rule.name(), text = whole.as_str(), "protected");
        out.push(Chunk::Protected(rule.capture(&caps)));
        last = whole.end();
    }

    if last < text.len() {
        out.push(Chunk::Literal(text[last..].to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(chunks: &[Chunk]) -> Vec<Option<RuleKind>> {
        chunks
            .iter()
            .map(|chunk| match chunk {
                Chunk::Literal(_) => None,
                Chunk::Protected(p) => Some(p.kind()),
            })
            .collect()
    }

    #[test]
    fn test_patterns_compile() {
        for rule in RuleKind::ORDERED {
            let _ = rule.regex();
        }
    }

    #[test]
    fn test_manual_tag_pairs() {
        let chunks = protect("你的名字叫<ja>佐々木？<ja>吗？");
        assert_eq!(
            chunks,
            vec![
                Chunk::Literal("你的名字叫".to_string()),
                Chunk::Protected(Protected::ManualTag {
                    tag: "ja".to_string(),
                    content: "佐々木？".to_string(),
                    raw: "<ja>佐々木？<ja>".to_string(),
                }),
                Chunk::Literal("吗？".to_string()),
            ]
        );

        let chunks = protect("<ja>佐々木</ja>");
        assert!(matches!(
            &chunks[..],
            [Chunk::Protected(Protected::ManualTag { tag, content, .. })]
                if tag == "ja" && content == "佐々木"
        ));
    }

    #[test]
    fn test_unpaired_tag_is_literal() {
        let chunks = protect("你的名字叫<ja>佐々木。");
        // The lone tag letters are still picked up by the Latin rule
        assert!(!chunks
            .iter()
            .any(|c| matches!(c, Chunk::Protected(Protected::ManualTag { .. }))));
        assert_eq!(
            chunks.iter().map(Chunk::raw).collect::<String>(),
            "你的名字叫<ja>佐々木。"
        );
    }

    #[test]
    fn test_korean_run() {
        let chunks = protect("韩语中的안녕 오빠读什么呢？");
        assert_eq!(
            chunks[1],
            Chunk::Protected(Protected::Korean("안녕 오빠".to_string()))
        );
        assert_eq!(kinds(&chunks), vec![None, Some(RuleKind::Korean), None]);
    }

    #[test]
    fn test_english_runs() {
        let chunks = protect("四款iPhone 15系列和三款Apple Watch等");
        let english: Vec<&str> = chunks
            .iter()
            .filter_map(|c| match c {
                Chunk::Protected(Protected::English(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(english, vec!["iPhone ", "Apple Watch"]);
    }

    #[test]
    fn test_whole_text_protection_rules() {
        // Latin rule always protects, even the whole input
        assert_eq!(
            protect("iPhone"),
            vec![Chunk::Protected(Protected::English("iPhone".to_string()))]
        );

        // Exempt rules leave a whole-text match alone
        assert_eq!(protect("“你好”"), vec![Chunk::Literal("“你好”".to_string())]);
        assert_eq!(protect("3.14"), vec![Chunk::Literal("3.14".to_string())]);
    }

    #[test]
    fn test_number_run() {
        let chunks = protect("价格3.5，很便宜");
        assert_eq!(
            chunks,
            vec![
                Chunk::Literal("价格".to_string()),
                Chunk::Protected(Protected::Number("3.5，".to_string())),
                Chunk::Literal("很便宜".to_string()),
            ]
        );
    }

    #[test]
    fn test_quotes() {
        let chunks = protect("他说“今日は”然后走了");
        assert_eq!(
            chunks[1],
            Chunk::Protected(Protected::StructuralQuote {
                text: "“今日は”".to_string(),
                inner: "今日は".to_string(),
            })
        );

        let chunks = protect("他说'你好'然后");
        assert_eq!(
            chunks[1],
            Chunk::Protected(Protected::SimpleQuote {
                text: "'你好'".to_string(),
                inner: "你好".to_string(),
            })
        );
    }

    #[test]
    fn test_earlier_rule_wins_overlap() {
        // The Latin rule swallows the brackets before the bracket rule runs
        let chunks = protect("我用（iPhone）拍照");
        assert_eq!(
            chunks[1],
            Chunk::Protected(Protected::English("（iPhone）".to_string()))
        );
    }

    #[test]
    fn test_chunks_reproduce_input() {
        let text = "你的名字叫<ja>佐々木？<ja>吗？韩语中的안녕 오빠读什么呢？\
                    あなたの体育の先生は誰ですか? 此次发布会带来了四款iPhone 15系列机型";
        let rebuilt: String = protect(text).iter().map(Chunk::raw).collect();
        assert_eq!(rebuilt, text);
    }
}
