//! Preset candidate rows: for every char abbreviation prefix, the character
//! reached by each selector key.

use ll_core::{CharMeta, SimpleToken};
use std::collections::BTreeMap;
use std::fmt;

/// Selector keys, in display order.
pub const SELECTOR_KEYS: [char; 4] = ['w', 'r', 'u', 'o'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRow {
    pub prefix: String,
    /// One `(key, token)` per selector key; placeholder `k` marks an empty slot.
    pub candidates: Vec<(char, SimpleToken)>,
}

impl fmt::Display for PresetRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self
            .candidates
            .iter()
            .map(|(key, token)| format!("{key}{token}"))
            .collect();
        write!(f, "{}\t{}", cells.join(" "), self.prefix)
    }
}

/// Build rows from char simple codes (in simple-list order), sorted by prefix.
pub fn build_preset(simple_codes: &[CharMeta]) -> Vec<PresetRow> {
    let mut groups: BTreeMap<String, Vec<&CharMeta>> = BTreeMap::new();
    for meta in simple_codes {
        let mut symbols = meta.code.chars();
        if symbols.next_back().is_none() || symbols.as_str().is_empty() {
            continue;
        }
        groups.entry(symbols.as_str().to_string()).or_default().push(meta);
    }

    groups
        .into_iter()
        .map(|(prefix, members)| {
            let candidates = SELECTOR_KEYS
                .iter()
                .zip(1u8..)
                .map(|(&key, slot)| {
                    let token = members
                        .iter()
                        .find(|m| m.code.ends_with(key))
                        .map(|m| SimpleToken::Real(m.character.clone()))
                        .unwrap_or(SimpleToken::Placeholder(slot));
                    (key, token)
                })
                .collect();
            PresetRow { prefix, candidates }
        })
        .collect()
}
