//! Stage 1: per-character full codes from component decompositions.

use ll_core::{CharMeta, ComponentMap, Decomposition, DivisionTable, FreqMap};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Maximum length of a full code.
pub const FULL_CODE_LEN: usize = 4;

/// Separator between raw component codes in the annotated form.
pub const ANNOTATION_SEP: &str = "_";

/// Major symbol: the first one.
fn major(code: &[char]) -> char {
    code[0]
}

/// Middle symbol: the second one, falling back to the first.
fn middle(code: &[char]) -> char {
    code[code.len().min(2) - 1]
}

/// Minor symbol: the third one, falling back to the second, then the first.
fn minor(code: &[char]) -> char {
    code[code.len().min(3) - 1]
}

/// Derive the full code from the codes of a decomposition's components.
///
/// Returns `None` when the decomposition is empty or any component that the
/// rule reads has no code.
pub fn full_code(component_codes: &[&str]) -> Option<String> {
    let symbols: Vec<Vec<char>> = component_codes.iter().map(|c| c.chars().collect()).collect();
    let code: String = match symbols.as_slice() {
        [] => return None,
        [only] => {
            if only.is_empty() {
                return None;
            }
            [major(only), middle(only), middle(only), minor(only)].iter().collect()
        }
        [first, second] => {
            if first.is_empty() || second.is_empty() {
                return None;
            }
            [major(first), major(second), middle(first), minor(second)].iter().collect()
        }
        [first, second, .., last] => {
            if first.is_empty() || second.is_empty() || last.is_empty() {
                return None;
            }
            [major(first), major(second), major(last), minor(last)].iter().collect()
        }
    };
    Some(code.chars().take(FULL_CODE_LEN).collect::<String>().to_lowercase())
}

/// Encode one decomposition: `(annotated, full code)`.
pub fn encode_division(division: &Decomposition, mappings: &ComponentMap) -> Option<(String, String)> {
    let codes: Vec<&str> = division
        .components
        .iter()
        .map(|comp| mappings.get(comp).map(String::as_str).unwrap_or(""))
        .collect();
    let code = full_code(&codes)?;
    let annotated = codes
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(ANNOTATION_SEP);
    Some((annotated, code))
}

/// Order used for every full-code table: code asc, frequency desc, character asc.
pub fn cmp_by_code(a: &CharMeta, b: &CharMeta) -> Ordering {
    a.code
        .cmp(&b.code)
        .then_with(|| b.freq.cmp(&a.freq))
        .then_with(|| a.character.cmp(&b.character))
        .then_with(|| a.variant.cmp(&b.variant))
}

/// Frequency desc, then code asc, then character asc.
pub fn cmp_by_freq(a: &CharMeta, b: &CharMeta) -> Ordering {
    b.freq
        .cmp(&a.freq)
        .then_with(|| a.code.cmp(&b.code))
        .then_with(|| a.character.cmp(&b.character))
        .then_with(|| a.variant.cmp(&b.variant))
}

fn encode_char(
    character: &str,
    divisions: &[Arc<Decomposition>],
    mappings: &ComponentMap,
    freqs: &FreqMap,
    out: &mut Vec<CharMeta>,
) {
    let freq = freqs.get(character).copied().unwrap_or(0);
    for (variant, division) in divisions.iter().enumerate() {
        let Some((annotated, code)) = encode_division(division, mappings) else {
            continue;
        };
        out.push(CharMeta {
            character: character.to_string(),
            code,
            annotated,
            freq,
            variant,
            primary: variant == 0,
            simplified: false,
            division: Some(Arc::clone(division)),
        });
    }
}

/// Build the full-code list for every (character, decomposition) pair.
///
/// Characters are split into one batch per available core; each batch fills a
/// private buffer which is appended to the shared result under one lock. The
/// final sort makes the output independent of batch completion order.
pub fn build_full_code_list(table: &DivisionTable, mappings: &ComponentMap, freqs: &FreqMap) -> Vec<CharMeta> {
    let chars: Vec<&String> = table.keys().collect();
    let workers = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let batch_size = chars.len().div_ceil(workers).max(1);
    tracing::debug!(chars = chars.len(), workers, batch_size, "encoding full codes");

    let merged = Mutex::new(Vec::with_capacity(chars.len()));
    chars.par_chunks(batch_size).for_each(|batch| {
        let mut local = Vec::with_capacity(batch.len());
        for character in batch {
            if let Some(divisions) = table.get(*character) {
                encode_char(character, divisions, mappings, freqs, &mut local);
            }
        }
        merged.lock().extend(local);
    });

    let mut list = merged.into_inner();
    list.sort_by(cmp_by_code);
    list
}

/// Character -> full code of its primary decomposition.
pub fn primary_code_map(full_codes: &[CharMeta]) -> HashMap<String, String> {
    full_codes
        .iter()
        .filter(|meta| meta.primary && !meta.simplified)
        .map(|meta| (meta.character.clone(), meta.code.clone()))
        .collect()
}
