//! Which tables a run writes, and under which names.

use ll_core::MergedEntry;
use ll_encoder::{EncodeOutput, EncoderPipeline};
use ll_tables::writers;
use ll_tables::TableFile;

pub const CHARS_FULL: &str = "code_chars_full.txt";
pub const CHARS_SIMPLE: &str = "code_chars_simp.txt";
pub const DIVISION: &str = "div_ll.txt";
pub const DAZHU_SPLIT: &str = "dazhu_chai.txt";
pub const WORDS_FULL: &str = "code_words_full.txt";
pub const WORDS_SIMPLE: &str = "code_words_simp.txt";
pub const LEXICON_FULL: &str = "linglong_full.txt";
pub const LEXICON_SIMPLE: &str = "linglong_simp.txt";
pub const PRESET: &str = "preset_data.txt";
pub const ROOTS: &str = "roots_dict.txt";
pub const CANDIDATES: &str = "genda_citi.txt";
pub const DAZHU_CODES: &str = "dazhu_code.txt";

/// Code tables that are always written.
pub fn code_tables(output: &EncodeOutput, roots: &[(String, String)]) -> Vec<TableFile> {
    let mut tables = vec![
        TableFile::new(CHARS_FULL, writers::char_codes(&output.full)),
        TableFile::new(CHARS_SIMPLE, writers::char_codes(&output.simple_by_code())),
        TableFile::new(DIVISION, writers::disassembly(&output.full)),
        TableFile::new(DAZHU_SPLIT, writers::dazhu_split(&output.full)),
        TableFile::new(WORDS_FULL, writers::word_codes(&output.words)),
        TableFile::new(WORDS_SIMPLE, writers::word_simple_codes(&output.word_simple)),
        TableFile::new(PRESET, writers::lines(&output.preset)),
        TableFile::new(ROOTS, writers::roots_dict(roots)),
    ];
    if !output.lexicon.is_empty() {
        tables.push(TableFile::new(LEXICON_FULL, writers::word_codes(&output.lexicon)));
        tables.push(TableFile::new(LEXICON_SIMPLE, writers::word_simple_codes(&output.lexicon_simple)));
    }
    tables
}

/// Merged candidate tables: suffixed, plus the unsuffixed dazhu variant.
pub fn candidate_tables(
    pipeline: &EncoderPipeline,
    output: &EncodeOutput,
    pinned: &[MergedEntry],
    dazhu_max_bytes: usize,
) -> Vec<TableFile> {
    let merged = pipeline.merge_candidates(output, pinned, false);
    let verbatim = pipeline.merge_candidates(output, pinned, true);
    vec![
        TableFile::new(CANDIDATES, writers::candidates(&merged)),
        TableFile::new(DAZHU_CODES, writers::dazhu_codes(&verbatim, dazhu_max_bytes)),
    ]
}
