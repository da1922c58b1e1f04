//! Tab-separated source tables.
//!
//! Every `parse_*` function works on text already in memory; the matching
//! `read_*` function fetches that text through a [`TableRepository`].

use crate::repository::TableRepository;
use ll_core::{ComponentMap, Decomposition, DivisionTable, FreqMap, LlError, MergedEntry, Result, SourceTag, WordEntry};
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

/// One symbol per char, except `{...}` which is a single named symbol.
const COMPONENT_PATTERN: &str = r"\{.*?\}|.";

fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> LlError {
    LlError::MalformedTable {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Parse `char\t[components,pinyin,set,codepoint]` lines.
///
/// Incomplete lines are skipped. Variants keep file order, so the first one
/// seen for a character is its primary decomposition.
pub fn parse_division_table(text: &str) -> Result<DivisionTable> {
    let splitter = Regex::new(COMPONENT_PATTERN).map_err(anyhow::Error::from)?;
    let mut table = DivisionTable::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if is_skipped(line) {
            continue;
        }
        let mut fields = line.split('\t');
        let (Some(character), Some(meta)) = (fields.next(), fields.next()) else {
            skipped += 1;
            continue;
        };
        let meta: Vec<&str> = meta.trim_matches(|c| c == '[' || c == ']').split(',').collect();
        if meta.len() < 4 {
            skipped += 1;
            continue;
        }
        let components: Vec<String> = splitter.find_iter(meta[0]).map(|m| m.as_str().to_string()).collect();
        if components.is_empty() {
            skipped += 1;
            continue;
        }
        let division = Decomposition::new(character, components).with_meta(meta[1], meta[2], meta[3]);
        table.entry(character.to_string()).or_default().push(Arc::new(division));
    }
    tracing::debug!(chars = table.len(), skipped, "division table parsed");
    Ok(table)
}

/// Raw `(code, root)` pairs of a component map, in file order.
pub fn parse_root_entries(path: &Path, text: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if is_skipped(line) {
            continue;
        }
        let (code, root) = line
            .split_once('\t')
            .ok_or_else(|| malformed(path, idx + 1, "expected `code\\troot`"))?;
        let root = root.split('\t').next().unwrap_or(root);
        entries.push((code.to_string(), root.to_string()));
    }
    Ok(entries)
}

/// Parse `code\tcomponent` lines into component -> code. `_` in codes reads as `1`.
pub fn parse_component_map(path: &Path, text: &str) -> Result<ComponentMap> {
    let map: ComponentMap = parse_root_entries(path, text)?
        .into_iter()
        .map(|(code, comp)| (comp, code.replace('_', "1")))
        .collect();
    tracing::debug!(components = map.len(), "component map parsed");
    Ok(map)
}

/// Parse `char\tfreq` lines. Frequencies are read as decimals and truncated.
pub fn parse_char_freq(path: &Path, text: &str) -> Result<FreqMap> {
    let mut freqs = FreqMap::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if is_skipped(line) {
            continue;
        }
        let (character, freq) = line
            .split_once('\t')
            .ok_or_else(|| malformed(path, idx + 1, "expected `char\\tfreq`"))?;
        let freq = freq.split('\t').next().unwrap_or(freq);
        let value = freq.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0);
        freqs.insert(character.to_string(), value);
    }
    tracing::debug!(chars = freqs.len(), "frequency table parsed");
    Ok(freqs)
}

/// Parse `word [weight]` lines separated by any whitespace.
pub fn parse_words(text: &str) -> Vec<WordEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !is_skipped(line))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let word = fields.next()?;
            Some(WordEntry::new(word, fields.next().unwrap_or("")))
        })
        .collect()
}

/// Parse `text\tcode[\tfreq]` lines as pinned entries.
pub fn parse_pinned(text: &str) -> Vec<MergedEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !is_skipped(line))
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let text = fields.next()?;
            let code = fields.next()?;
            let freq = fields.next().and_then(|f| f.parse::<i64>().ok()).unwrap_or(0);
            Some(MergedEntry::new(text, code, freq, SourceTag::Pinned))
        })
        .collect()
}

pub fn read_division_table(repo: &TableRepository, path: &Path) -> Result<DivisionTable> {
    parse_division_table(&repo.read(path)?)
}

pub fn read_component_map(repo: &TableRepository, path: &Path) -> Result<ComponentMap> {
    parse_component_map(path, &repo.read(path)?)
}

pub fn read_root_entries(repo: &TableRepository, path: &Path) -> Result<Vec<(String, String)>> {
    parse_root_entries(path, &repo.read(path)?)
}

pub fn read_char_freq(repo: &TableRepository, path: &Path) -> Result<FreqMap> {
    parse_char_freq(path, &repo.read(path)?)
}

pub fn read_words(repo: &TableRepository, path: &Path) -> Result<Vec<WordEntry>> {
    let words = parse_words(&repo.read(path)?);
    tracing::debug!(path = %path.display(), words = words.len(), "word list parsed");
    Ok(words)
}

/// Pinned entries; a missing file is an empty list.
pub fn read_pinned(repo: &TableRepository, path: &Path) -> Result<Vec<MergedEntry>> {
    match repo.read_optional(path)? {
        Some(text) => Ok(parse_pinned(&text)),
        None => {
            tracing::warn!(path = %path.display(), "pinned table not found, continuing without it");
            Ok(Vec::new())
        }
    }
}
