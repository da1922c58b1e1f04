use crate::error::{LlError, Result};
use crate::types::PLACEHOLDER_LIMIT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CHAR_QUOTAS: &str = "1:4,2:4,3:0,4:0";
pub const DEFAULT_WORD_QUOTAS: &str = "1:4,2:4,3:4,4:0";
/// Keys a word abbreviation may be spelled with. `e i o r u w` are selector keys.
pub const DEFAULT_KEY_ALPHABET: &str = "qtypasdfghjkl;zxcvbnm,./";
pub const DEFAULT_SUFFIXES: [&str; 10] = ["_", "e", "i", "[", "2", "3", "7", "8", "9", "0"];
pub const DEFAULT_PAGE_MARKER: &str = "=";

/// Abbreviation length -> how many entries may share one bucket at that length.
///
/// Lengths missing from the table have quota 0, i.e. "do not abbreviate".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuotaTable(BTreeMap<usize, usize>);

impl QuotaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, length: usize, quota: usize) -> Self {
        self.0.insert(length, quota);
        self
    }

    pub fn quota(&self, length: usize) -> usize {
        self.0.get(&length).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|q| *q == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(l, q)| (*l, *q))
    }

    /// Placeholder back-fill can only pad a bucket up to ten entries.
    pub fn ensure_placeholder_capacity(&self, max_length: usize) -> Result<()> {
        for (length, quota) in self.iter() {
            if length <= max_length && quota > usize::from(PLACEHOLDER_LIMIT) {
                return Err(LlError::PlaceholderOverflow {
                    length,
                    quota,
                    limit: usize::from(PLACEHOLDER_LIMIT),
                });
            }
        }
        Ok(())
    }
}

impl FromStr for QuotaTable {
    type Err = LlError;

    /// Parse `"1:4,2:4,3:0,4:0"`. An empty string is an empty table.
    fn from_str(s: &str) -> Result<Self> {
        let mut table = BTreeMap::new();
        if s.trim().is_empty() {
            return Ok(Self(table));
        }
        for pair in s.split(',') {
            let (length, quota) = pair
                .split_once(':')
                .ok_or_else(|| LlError::InvalidQuota(format!("expected `length:quota`, got `{pair}`")))?;
            let length: usize = length
                .trim()
                .parse()
                .map_err(|_| LlError::InvalidQuota(format!("bad length in `{pair}`")))?;
            let quota: usize = quota
                .trim()
                .parse()
                .map_err(|_| LlError::InvalidQuota(format!("bad quota in `{pair}`")))?;
            if length == 0 {
                return Err(LlError::InvalidQuota(format!("length must be positive in `{pair}`")));
            }
            table.insert(length, quota);
        }
        Ok(Self(table))
    }
}

impl TryFrom<String> for QuotaTable {
    type Error = LlError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<QuotaTable> for String {
    fn from(table: QuotaTable) -> Self {
        table.to_string()
    }
}

impl fmt::Display for QuotaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(l, q)| format!("{l}:{q}")).collect();
        f.write_str(&parts.join(","))
    }
}

/// How members of a collision group are suffixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixPolicy {
    /// Every member, the leader included, gets the suffix of its position.
    #[default]
    Always,
    /// The leader keeps the bare code; member `p >= 1` gets suffix `p`.
    BareLeader,
    /// Codes are left as they are.
    Never,
}

/// Everything the encoder needs besides the tables themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub char_quotas: QuotaTable,
    pub word_quotas: QuotaTable,
    pub lexicon_quotas: QuotaTable,
    /// Characters that only ever get their full code.
    pub no_simplify: Vec<String>,
    pub key_alphabet: String,
    pub suffixes: Vec<String>,
    pub page_marker: String,
    pub full_code_policy: SuffixPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            char_quotas: DEFAULT_CHAR_QUOTAS.parse().unwrap_or_default(),
            word_quotas: DEFAULT_WORD_QUOTAS.parse().unwrap_or_default(),
            lexicon_quotas: DEFAULT_WORD_QUOTAS.parse().unwrap_or_default(),
            no_simplify: vec!["的".into(), "了".into()],
            key_alphabet: DEFAULT_KEY_ALPHABET.into(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            page_marker: DEFAULT_PAGE_MARKER.into(),
            full_code_policy: SuffixPolicy::Always,
        }
    }
}

impl BuildConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the encoder cannot honour.
    pub fn validate(&self) -> Result<()> {
        self.word_quotas.ensure_placeholder_capacity(3)?;
        if self.suffixes.is_empty() {
            return Err(LlError::InvalidConfig("suffix alphabet must not be empty".into()));
        }
        if self.key_alphabet.is_empty() {
            return Err(LlError::InvalidConfig("key alphabet must not be empty".into()));
        }
        Ok(())
    }
}
