//! Stage 5: collision suffixes for the merged candidate table.
//!
//! Entries sharing a code are ranked by frequency (stable, so ties keep
//! source order) and the rank selects a suffix. Ranks past the end of the
//! alphabet are paged: `=` + suffix, then `==` + suffix, and so on.
//! Entries never move; only their codes change.

use ll_core::config::{DEFAULT_PAGE_MARKER, DEFAULT_SUFFIXES};
use ll_core::{BuildConfig, MergedEntry, SourceTag, SuffixPolicy};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Disambiguator {
    suffixes: Vec<String>,
    page_marker: String,
}

impl Default for Disambiguator {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            page_marker: DEFAULT_PAGE_MARKER.to_string(),
        }
    }
}

impl Disambiguator {
    pub fn new(suffixes: Vec<String>, page_marker: impl Into<String>) -> Self {
        Self {
            suffixes,
            page_marker: page_marker.into(),
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.suffixes.clone(), config.page_marker.clone())
    }

    /// Suffix for rank `position` inside a collision group.
    pub fn suffix_for(&self, position: usize) -> String {
        let n = self.suffixes.len();
        if n == 0 {
            return String::new();
        }
        if position < n {
            return self.suffixes[position].clone();
        }
        let overflow = position - n;
        format!("{}{}", self.page_marker.repeat(overflow / n + 1), self.suffixes[overflow % n])
    }

    /// Suffix every collision group of `entries` under `policy`.
    pub fn resolve(&self, entries: &[MergedEntry], policy: SuffixPolicy) -> Vec<MergedEntry> {
        let mut out = entries.to_vec();
        if policy == SuffixPolicy::Never {
            return out;
        }

        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            groups.entry(entry.code.as_str()).or_default().push(i);
        }

        let mut collisions = 0usize;
        for members in groups.values_mut() {
            if members.len() < 2 {
                continue;
            }
            collisions += 1;
            // Stable: equal frequencies keep source order.
            members.sort_by(|a, b| entries[*b].freq.cmp(&entries[*a].freq));
            for (rank, &idx) in members.iter().enumerate() {
                if rank == 0 && policy == SuffixPolicy::BareLeader {
                    continue;
                }
                out[idx].code.push_str(&self.suffix_for(rank));
            }
        }
        tracing::debug!(entries = entries.len(), collisions, ?policy, "disambiguated");
        out
    }
}

/// One source's contribution to the merged table.
#[derive(Debug, Clone)]
pub struct CodeStream {
    pub source: SourceTag,
    pub policy: SuffixPolicy,
    pub entries: Vec<MergedEntry>,
}

impl CodeStream {
    pub fn new(source: SourceTag, policy: SuffixPolicy, entries: Vec<MergedEntry>) -> Self {
        Self { source, policy, entries }
    }
}

/// Concatenate streams in order, resolving collisions inside each stream.
pub fn merge_streams(disambiguator: &Disambiguator, streams: &[CodeStream]) -> Vec<MergedEntry> {
    let mut merged = Vec::with_capacity(streams.iter().map(|s| s.entries.len()).sum());
    for stream in streams {
        let resolved = disambiguator.resolve(&stream.entries, stream.policy);
        tracing::debug!(source = stream.source.as_str(), entries = resolved.len(), "stream merged");
        merged.extend(resolved);
    }
    merged
}

/// Concatenate streams, then resolve collisions across all of them at once.
pub fn disambiguate(disambiguator: &Disambiguator, streams: &[CodeStream], policy: SuffixPolicy) -> Vec<MergedEntry> {
    let all: Vec<MergedEntry> = streams.iter().flat_map(|s| s.entries.iter().cloned()).collect();
    disambiguator.resolve(&all, policy)
}
