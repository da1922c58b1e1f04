//! Stage 2: single-character abbreviations.
//!
//! Characters are visited in descending frequency so the most used ones claim
//! the shortest codes first.

use crate::full_code::cmp_by_freq;
use ll_core::{CharMeta, QuotaTable};
use std::collections::{HashMap, HashSet};

/// Prefix lengths up to this one get the full code's last symbol appended.
const TAIL_APPEND_MAX: usize = 2;

pub struct CharSimplifier {
    quotas: QuotaTable,
    no_simplify: HashSet<String>,
}

impl CharSimplifier {
    pub fn new(quotas: QuotaTable) -> Self {
        Self {
            quotas,
            no_simplify: HashSet::new(),
        }
    }

    pub fn with_no_simplify<I, S>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_simplify.extend(chars.into_iter().map(Into::into));
        self
    }

    /// Assign abbreviations to `full_codes` (expected in full-code order).
    ///
    /// Returns only the characters that received one, as new records sorted by
    /// frequency.
    pub fn build(&self, full_codes: &[CharMeta]) -> Vec<CharMeta> {
        let mut ranked: Vec<&CharMeta> = full_codes.iter().collect();
        // Stable, so equal frequencies keep the full-code order.
        ranked.sort_by(|a, b| b.freq.cmp(&a.freq));

        let mut results: Vec<CharMeta> = Vec::new();
        let mut used: HashSet<String> = HashSet::new();
        // (abbreviation length, prefix) -> accepted abbreviations in that bucket
        let mut buckets: HashMap<(usize, String), usize> = HashMap::new();

        for meta in ranked {
            if self.no_simplify.contains(&meta.character) {
                continue;
            }
            let Some(simplified) = self.pick(&meta.code, &buckets, &mut used) else {
                continue;
            };
            if simplified == meta.code {
                continue;
            }
            let symbols: Vec<char> = simplified.chars().collect();
            for p in 1..=symbols.len() {
                let prefix: String = symbols[..p].iter().collect();
                *buckets.entry((symbols.len(), prefix)).or_insert(0) += 1;
            }
            results.push(meta.simplify(simplified));
        }

        results.sort_by(cmp_by_freq);
        tracing::debug!(candidates = full_codes.len(), assigned = results.len(), "char abbreviations");
        results
    }

    /// First free abbreviation for `code`, scanning prefix lengths upward.
    fn pick(&self, code: &str, buckets: &HashMap<(usize, String), usize>, used: &mut HashSet<String>) -> Option<String> {
        let symbols: Vec<char> = code.chars().collect();
        let last = *symbols.last()?;
        for p in 1..=symbols.len() {
            let quota = self.quotas.quota(p);
            if quota == 0 {
                continue;
            }
            let prefix: String = symbols[..p].iter().collect();
            let target_len = if p <= TAIL_APPEND_MAX { p + 1 } else { p };
            let taken = buckets.get(&(target_len, prefix.clone())).copied().unwrap_or(0);
            if taken >= quota {
                continue;
            }
            let candidate = if p <= TAIL_APPEND_MAX {
                format!("{prefix}{last}")
            } else {
                prefix
            };
            if used.insert(candidate.clone()) {
                return Some(candidate);
            }
        }
        None
    }
}
