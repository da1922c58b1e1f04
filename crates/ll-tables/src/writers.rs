//! Line serializers for every output table.

use ll_core::{CharMeta, MergedEntry, WordCode, WordSimpleCode};
use std::fmt::Write as _;

/// Default byte cap of the dazhu code table.
pub const DAZHU_MAX_BYTES: usize = 30 * 1024 * 1024;

/// A rendered table and the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFile {
    pub name: &'static str,
    pub contents: String,
}

impl TableFile {
    pub fn new(name: &'static str, contents: String) -> Self {
        Self { name, contents }
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }
}

/// `char\tcode\tfreq`, in the given order.
pub fn char_codes(list: &[CharMeta]) -> String {
    let mut out = String::new();
    for meta in list {
        let _ = writeln!(out, "{}\t{}\t{}", meta.character, meta.code, meta.freq);
    }
    out
}

/// `text\tcode[\tweight]`; the weight column is left out when empty.
fn weighted_line(out: &mut String, text: &dyn std::fmt::Display, code: &str, weight: &str) {
    let _ = if weight.is_empty() {
        writeln!(out, "{text}\t{code}")
    } else {
        writeln!(out, "{text}\t{code}\t{weight}")
    };
}

pub fn word_codes(list: &[WordCode]) -> String {
    let mut out = String::new();
    for word in list {
        weighted_line(&mut out, &word.word, &word.code, &word.weight);
    }
    out
}

/// Placeholders render as circled numerals.
pub fn word_simple_codes(list: &[WordSimpleCode]) -> String {
    let mut out = String::new();
    for entry in list {
        weighted_line(&mut out, &entry.token, &entry.code, &entry.weight);
    }
    out
}

/// Full-code entries that carry a decomposition, stably sorted by character.
fn by_character(full: &[CharMeta]) -> Vec<&CharMeta> {
    let mut sorted: Vec<&CharMeta> = full.iter().filter(|m| m.division.is_some()).collect();
    sorted.sort_by(|a, b| a.character.cmp(&b.character));
    sorted
}

/// `char\t[components·annotated·pinyin·set·codepoint]`.
pub fn disassembly(full: &[CharMeta]) -> String {
    let mut out = String::new();
    for meta in by_character(full) {
        if let Some(div) = &meta.division {
            let _ = writeln!(
                out,
                "{}\t[{}·{}·{}·{}·{}]",
                meta.character,
                div.joined(),
                meta.annotated,
                div.pinyin,
                div.charset,
                div.codepoint
            );
        }
    }
    out
}

/// Two lines per variant: `components\tchar` and `set〔codepoint〕\tchar`.
pub fn dazhu_split(full: &[CharMeta]) -> String {
    let mut out = String::new();
    for meta in by_character(full) {
        if let Some(div) = &meta.division {
            let _ = writeln!(out, "{}\t{}", div.joined(), meta.character);
            let _ = writeln!(out, "{}〔{}〕\t{}", div.charset, div.codepoint, meta.character);
        }
    }
    out
}

/// Merged candidate table: `text\tcode`.
pub fn candidates(merged: &[MergedEntry]) -> String {
    let mut out = String::new();
    for entry in merged {
        let _ = writeln!(out, "{}\t{}", entry.text, entry.code);
    }
    out
}

/// `code\ttext`, stopping before the first line that would pass `max_bytes`.
pub fn dazhu_codes(merged: &[MergedEntry], max_bytes: usize) -> String {
    let mut out = String::new();
    let mut line = String::new();
    for entry in merged {
        line.clear();
        let _ = writeln!(line, "{}\t{}", entry.code, entry.text);
        if out.len() + line.len() > max_bytes {
            tracing::warn!(written = out.len(), max_bytes, "dazhu code table truncated");
            break;
        }
        out.push_str(&line);
    }
    out
}

/// `root\t]code` for every raw component map entry.
pub fn roots_dict(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (code, root) in entries {
        let _ = writeln!(out, "{root}\t]{code}");
    }
    out
}

/// One line per already-rendered row.
pub fn lines<T: std::fmt::Display>(rows: &[T]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{row}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll_core::{Decomposition, SourceTag};
    use std::sync::Arc;

    fn full(character: &str, code: &str) -> CharMeta {
        let div = Decomposition::new(character, vec!["口".into(), "木".into()]).with_meta("kou", "CJK", "U+53E3");
        CharMeta {
            character: character.into(),
            code: code.into(),
            annotated: "kou_mu".into(),
            freq: 3,
            variant: 0,
            primary: true,
            simplified: false,
            division: Some(Arc::new(div)),
        }
    }

    #[test]
    fn test_char_codes() {
        assert_eq!(char_codes(&[full("呆", "kmou")]), "呆\tkmou\t3\n");
    }

    #[test]
    fn test_word_weight_column_optional() {
        let words = vec![
            WordCode { word: "我们".into(), code: "wmmm".into(), weight: "9".into() },
            WordCode { word: "他们".into(), code: "tmmm".into(), weight: String::new() },
        ];
        assert_eq!(word_codes(&words), "我们\twmmm\t9\n他们\ttmmm\n");
    }

    #[test]
    fn test_word_simple_placeholders() {
        let list = vec![WordSimpleCode::real("我们", "w", "9"), WordSimpleCode::placeholder(2, "w")];
        assert_eq!(word_simple_codes(&list), "我们\tw\t9\n②\tw\t-2\n");
    }

    #[test]
    fn test_disassembly_and_split() {
        let mut simple = full("呆", "km");
        simple.division = None;
        let list = vec![full("呆", "kmou"), full("杏", "mkuu"), simple];
        let text = disassembly(&list);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("呆\t[口木·kou_mu·kou·CJK·U+53E3]\n"));
        let split = dazhu_split(&list[..1]);
        assert_eq!(split, "口木\t呆\nCJK〔U+53E3〕\t呆\n");
    }

    #[test]
    fn test_dazhu_cap() {
        let merged: Vec<MergedEntry> = (0..10)
            .map(|i| MergedEntry::new(format!("字{i}"), "abcd", 0, SourceTag::CharFull))
            .collect();
        let line_len = "abcd\t字0\n".len();
        let text = dazhu_codes(&merged, line_len * 3 + 1);
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("abcd\t字0\n"));
        assert_eq!(dazhu_codes(&merged, usize::MAX).lines().count(), 10);
    }

    #[test]
    fn test_roots_dict() {
        let entries = vec![("a_".to_string(), "口".to_string())];
        assert_eq!(roots_dict(&entries), "口\t]a_\n");
    }

    #[test]
    fn test_table_file() {
        let file = TableFile::new("genda_citi.txt", candidates(&[MergedEntry::new("口", "ku", 0, SourceTag::CharSimple)]));
        assert_eq!(file.contents, "口\tku\n");
        assert_eq!(file.line_count(), 1);
    }
}
