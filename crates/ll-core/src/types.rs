use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Number of reserved placeholder markers (①..⑩).
pub const PLACEHOLDER_LIMIT: u8 = 10;

/// One way of splitting a character into root components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub character: String,
    /// Ordered component symbols, never empty.
    pub components: Vec<String>,
    pub pinyin: String,
    pub charset: String,
    pub codepoint: String,
}

impl Decomposition {
    pub fn new(character: impl Into<String>, components: Vec<String>) -> Self {
        Self {
            character: character.into(),
            components,
            pinyin: String::new(),
            charset: String::new(),
            codepoint: String::new(),
        }
    }

    pub fn with_meta(
        mut self,
        pinyin: impl Into<String>,
        charset: impl Into<String>,
        codepoint: impl Into<String>,
    ) -> Self {
        self.pinyin = pinyin.into();
        self.charset = charset.into();
        self.codepoint = codepoint.into();
        self
    }

    /// Components concatenated without separator, as shown in disassembly tables.
    pub fn joined(&self) -> String {
        self.components.concat()
    }
}

/// Character -> decomposition variants. The first variant is the primary one.
pub type DivisionTable = HashMap<String, Vec<Arc<Decomposition>>>;

/// Component symbol -> code string (1-3 symbols).
pub type ComponentMap = HashMap<String, String>;

/// Character -> usage frequency.
pub type FreqMap = HashMap<String, i64>;

/// A coded character: either a full code from 4.1 or a derived simple code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMeta {
    pub character: String,
    pub code: String,
    /// Raw per-component codes joined by `_`, empty for simple codes.
    pub annotated: String,
    pub freq: i64,
    /// Index of the decomposition variant this entry came from.
    pub variant: usize,
    pub primary: bool,
    pub simplified: bool,
    pub division: Option<Arc<Decomposition>>,
}

impl CharMeta {
    /// Derive a simple-code record; it shares nothing mutable with `self`.
    pub fn simplify(&self, code: impl Into<String>) -> Self {
        Self {
            character: self.character.clone(),
            code: code.into(),
            annotated: String::new(),
            freq: self.freq,
            variant: self.variant,
            primary: self.primary,
            simplified: true,
            division: None,
        }
    }
}

/// Parse a weight or frequency column. Empty or invalid text counts as zero.
pub fn parse_weight(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// A multi-character word from the input word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    /// Raw weight text, possibly empty.
    #[serde(default)]
    pub weight: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            weight: weight.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCode {
    pub word: String,
    pub code: String,
    pub weight: String,
}

impl WordCode {
    pub fn weight_value(&self) -> i64 {
        parse_weight(&self.weight)
    }

    pub fn char_count(&self) -> usize {
        self.word.chars().count()
    }
}

/// Text slot of a word abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleToken {
    Real(String),
    /// Reserved slot marker, numbered from 1 to [`PLACEHOLDER_LIMIT`].
    Placeholder(u8),
}

impl SimpleToken {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn placeholder_index(&self) -> Option<u8> {
        match self {
            Self::Placeholder(i) => Some(*i),
            Self::Real(_) => None,
        }
    }
}

impl fmt::Display for SimpleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(word) => f.write_str(word),
            // ① is U+2460; indices are bounded by PLACEHOLDER_LIMIT.
            Self::Placeholder(i) => match char::from_u32(0x2460 + u32::from(*i).saturating_sub(1)) {
                Some(c) => write!(f, "{c}"),
                None => write!(f, "({i})"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSimpleCode {
    pub token: SimpleToken,
    pub code: String,
    pub weight: String,
}

impl WordSimpleCode {
    pub fn real(word: impl Into<String>, code: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            token: SimpleToken::Real(word.into()),
            code: code.into(),
            weight: weight.into(),
        }
    }

    /// Placeholder `index` carries the synthetic weight `-index`.
    pub fn placeholder(index: u8, code: impl Into<String>) -> Self {
        Self {
            token: SimpleToken::Placeholder(index),
            code: code.into(),
            weight: format!("-{index}"),
        }
    }

    pub fn weight_value(&self) -> i64 {
        parse_weight(&self.weight)
    }
}

/// Origin of an entry in the merged candidate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Pinned,
    CharSimple,
    CharFull,
    WordSimple,
    WordFull,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pinned => "citi_pre",
            Self::CharSimple => "chars_simp",
            Self::CharFull => "chars_full",
            Self::WordSimple => "words_simp",
            Self::WordFull => "words_full",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub text: String,
    pub code: String,
    pub freq: i64,
    pub source: SourceTag,
}

impl MergedEntry {
    pub fn new(text: impl Into<String>, code: impl Into<String>, freq: i64, source: SourceTag) -> Self {
        Self {
            text: text.into(),
            code: code.into(),
            freq,
            source,
        }
    }
}

impl From<&CharMeta> for MergedEntry {
    fn from(meta: &CharMeta) -> Self {
        let source = if meta.simplified { SourceTag::CharSimple } else { SourceTag::CharFull };
        Self::new(meta.character.clone(), meta.code.clone(), meta.freq, source)
    }
}

impl From<&WordCode> for MergedEntry {
    fn from(word: &WordCode) -> Self {
        Self::new(word.word.clone(), word.code.clone(), word.weight_value(), SourceTag::WordFull)
    }
}

impl From<&WordSimpleCode> for MergedEntry {
    fn from(word: &WordSimpleCode) -> Self {
        Self::new(word.token.to_string(), word.code.clone(), word.weight_value(), SourceTag::WordSimple)
    }
}
