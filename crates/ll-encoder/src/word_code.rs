//! Stage 3: multi-character word full codes, derived from character codes.

use ll_core::{WordCode, WordEntry};
use std::collections::HashMap;

/// First `n` symbols of a code, if it has that many.
fn head(code: &str, n: usize) -> Option<&str> {
    match code.char_indices().nth(n) {
        Some((end, _)) => Some(&code[..end]),
        None if code.chars().count() == n => Some(code),
        None => None,
    }
}

fn lookup<'m>(char_codes: &'m HashMap<String, String>, c: &str) -> Option<&'m str> {
    char_codes.get(c).map(String::as_str)
}

/// Code for one word, or `None` when a character is uncoded or too short.
///
/// - 2 chars: first two symbols of each
/// - 3 chars: first symbol of the first two, first two of the third
/// - 4+ chars: first symbol of chars 1, 2, 3 and the last one
pub fn word_code(word: &str, char_codes: &HashMap<String, String>) -> Option<String> {
    let chars: Vec<String> = word.chars().map(String::from).collect();
    match chars.as_slice() {
        [a, b] => Some([head(lookup(char_codes, a)?, 2)?, head(lookup(char_codes, b)?, 2)?].concat()),
        [a, b, c] => Some(
            [
                head(lookup(char_codes, a)?, 1)?,
                head(lookup(char_codes, b)?, 1)?,
                head(lookup(char_codes, c)?, 2)?,
            ]
            .concat(),
        ),
        [a, b, c, .., z] => Some(
            [
                head(lookup(char_codes, a)?, 1)?,
                head(lookup(char_codes, b)?, 1)?,
                head(lookup(char_codes, c)?, 1)?,
                head(lookup(char_codes, z)?, 1)?,
            ]
            .concat(),
        ),
        _ => None,
    }
}

/// Code every entry; words that cannot be coded are dropped. Input order is kept.
pub fn build_word_codes(entries: &[WordEntry], char_codes: &HashMap<String, String>) -> Vec<WordCode> {
    let codes: Vec<WordCode> = entries
        .iter()
        .filter_map(|entry| {
            word_code(&entry.word, char_codes).map(|code| WordCode {
                word: entry.word.clone(),
                code,
                weight: entry.weight.clone(),
            })
        })
        .collect();
    tracing::debug!(entries = entries.len(), coded = codes.len(), "word full codes");
    codes
}
