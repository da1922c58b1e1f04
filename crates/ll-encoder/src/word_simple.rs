//! Stage 4: word abbreviations with placeholder back-fill.
//!
//! Words are ranked by weight and take the shortest abbreviation whose bucket
//! still has room. Afterwards every bucket is padded with placeholders up to
//! its quota, and every bucket nobody uses is filled entirely, so the table
//! always lists the whole abbreviation space.

use ll_core::config::DEFAULT_KEY_ALPHABET;
use ll_core::{QuotaTable, Result, WordCode, WordSimpleCode};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Abbreviations are 1 to 3 symbols long.
pub const MAX_ABBREV_LEN: usize = 3;

pub struct WordSimplifier {
    quotas: QuotaTable,
    keys: Vec<char>,
    backfill: bool,
}

impl WordSimplifier {
    /// Simplifier with placeholder back-fill over the default key alphabet.
    pub fn new(quotas: QuotaTable) -> Result<Self> {
        quotas.ensure_placeholder_capacity(MAX_ABBREV_LEN)?;
        Ok(Self {
            quotas,
            keys: DEFAULT_KEY_ALPHABET.chars().collect(),
            backfill: true,
        })
    }

    /// Simplifier that only emits real words.
    pub fn without_backfill(quotas: QuotaTable) -> Self {
        Self {
            quotas,
            keys: DEFAULT_KEY_ALPHABET.chars().collect(),
            backfill: false,
        }
    }

    pub fn with_key_alphabet(mut self, keys: &str) -> Self {
        self.keys = keys.chars().collect();
        self
    }

    pub fn build(&self, word_codes: &[WordCode]) -> Vec<WordSimpleCode> {
        let mut ranked: Vec<&WordCode> = word_codes.iter().collect();
        ranked.sort_by(|a, b| b.weight_value().cmp(&a.weight_value()));

        let mut counters: HashMap<(usize, String), usize> = HashMap::new();
        let mut result = Vec::new();
        for word in ranked {
            if let Some(code) = self.assign(word, &mut counters) {
                result.push(WordSimpleCode::real(word.word.clone(), code, word.weight.clone()));
            }
        }
        let assigned = result.len();

        sort_word_simple_codes(&mut result);
        if self.backfill {
            result = self.pad_buckets(result);
            result.extend(self.fill_unused_buckets(&result));
            sort_word_simple_codes(&mut result);
        }
        tracing::debug!(words = word_codes.len(), assigned, total = result.len(), "word abbreviations");
        result
    }

    fn assign(&self, word: &WordCode, counters: &mut HashMap<(usize, String), usize>) -> Option<String> {
        let symbols: Vec<char> = word.code.chars().collect();
        let char_count = word.char_count();
        for length in 1..=MAX_ABBREV_LEN {
            let quota = self.quotas.quota(length);
            if quota == 0 {
                continue;
            }
            // Two-symbol abbreviations are for 2-char words, three-symbol ones for 3-char words.
            if length >= 2 && char_count != length {
                continue;
            }
            let base: String = if length == 2 {
                if symbols.len() < 3 {
                    continue;
                }
                [symbols[0], symbols[2]].iter().collect()
            } else {
                if symbols.len() < length {
                    continue;
                }
                symbols[..length].iter().collect()
            };
            let count = counters.entry((length, base.clone())).or_insert(0);
            if *count < quota {
                *count += 1;
                return Some(base);
            }
        }
        None
    }

    /// Pad each occupied bucket of a sorted list up to its quota.
    fn pad_buckets(&self, sorted: Vec<WordSimpleCode>) -> Vec<WordSimpleCode> {
        let mut out = Vec::with_capacity(sorted.len());
        let mut iter = sorted.into_iter().peekable();
        while let Some(first) = iter.next() {
            let code = first.code.clone();
            let mut size = 1;
            out.push(first);
            while let Some(next) = iter.next_if(|e| e.code == code) {
                out.push(next);
                size += 1;
            }
            let quota = self.quotas.quota(code.chars().count());
            out.extend(placeholders(&code, size + 1, quota));
        }
        out
    }

    /// Placeholders for every possible bucket that has no real word at all.
    fn fill_unused_buckets(&self, entries: &[WordSimpleCode]) -> Vec<WordSimpleCode> {
        let occupied: HashSet<&str> = entries
            .iter()
            .filter(|e| !e.token.is_placeholder())
            .map(|e| e.code.as_str())
            .collect();
        let mut out = Vec::new();
        for length in 1..=MAX_ABBREV_LEN {
            let quota = self.quotas.quota(length);
            if quota == 0 {
                continue;
            }
            for base in all_base_codes(&self.keys, length) {
                if !occupied.contains(base.as_str()) {
                    out.extend(placeholders(&base, 1, quota));
                }
            }
        }
        out
    }
}

/// Placeholders numbered `start..=quota` for one bucket.
fn placeholders(code: &str, start: usize, quota: usize) -> impl Iterator<Item = WordSimpleCode> + '_ {
    // Quotas were checked against PLACEHOLDER_LIMIT, so indices fit in u8.
    (start..=quota).filter_map(move |i| u8::try_from(i).ok().map(|i| WordSimpleCode::placeholder(i, code)))
}

/// Every string of `length` symbols over `keys`, in alphabet order.
pub fn all_base_codes(keys: &[char], length: usize) -> Vec<String> {
    let mut codes = vec![String::new()];
    for _ in 0..length {
        codes = codes
            .iter()
            .flat_map(|prefix| keys.iter().map(move |k| format!("{prefix}{k}")))
            .collect();
    }
    codes
}

/// Code asc; real words before placeholders; placeholders by index;
/// real words by weight desc, then by word.
pub fn cmp_word_simple(a: &WordSimpleCode, b: &WordSimpleCode) -> Ordering {
    a.code.cmp(&b.code).then_with(|| {
        match (a.token.placeholder_index(), b.token.placeholder_index()) {
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(&y),
            (None, None) => b
                .weight_value()
                .cmp(&a.weight_value())
                .then_with(|| a.token.to_string().cmp(&b.token.to_string())),
        }
    })
}

pub fn sort_word_simple_codes(entries: &mut [WordSimpleCode]) {
    entries.sort_by(cmp_word_simple);
}
