//! Encoder pipeline: runs every stage in order over loaded tables.

use crate::char_simple::CharSimplifier;
use crate::disambiguate::{merge_streams, CodeStream, Disambiguator};
use crate::full_code::{build_full_code_list, cmp_by_code, primary_code_map};
use crate::preset::{build_preset, PresetRow};
use crate::word_code::build_word_codes;
use crate::word_simple::WordSimplifier;
use ll_core::{
    BuildConfig, CharMeta, ComponentMap, DivisionTable, FreqMap, MergedEntry, Result, SourceTag, SuffixPolicy,
    WordCode, WordEntry, WordSimpleCode,
};
use tracing::info;

/// Tables the pipeline reads. All of them are read-only for the run.
#[derive(Debug, Clone, Default)]
pub struct EncoderInputs {
    pub divisions: DivisionTable,
    pub mappings: ComponentMap,
    pub freqs: FreqMap,
    pub words: Vec<WordEntry>,
    /// Supplementary lexicon; abbreviated without placeholders.
    pub lexicon: Option<Vec<WordEntry>>,
}

/// Everything the pipeline produces.
#[derive(Debug, Clone, Default)]
pub struct EncodeOutput {
    /// Full codes, sorted by code.
    pub full: Vec<CharMeta>,
    /// Char abbreviations, sorted by frequency.
    pub simple: Vec<CharMeta>,
    pub words: Vec<WordCode>,
    pub word_simple: Vec<WordSimpleCode>,
    pub lexicon: Vec<WordCode>,
    pub lexicon_simple: Vec<WordSimpleCode>,
    pub preset: Vec<PresetRow>,
}

impl EncodeOutput {
    /// Char abbreviations re-sorted by code, as written to tables.
    pub fn simple_by_code(&self) -> Vec<CharMeta> {
        let mut sorted = self.simple.clone();
        sorted.sort_by(cmp_by_code);
        sorted
    }

    fn has_lexicon(&self) -> bool {
        !self.lexicon.is_empty()
    }

    fn word_streams(&self) -> (&[WordSimpleCode], &[WordCode]) {
        if self.has_lexicon() {
            (self.lexicon_simple.as_slice(), self.lexicon.as_slice())
        } else {
            (self.word_simple.as_slice(), self.words.as_slice())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EncoderPipeline {
    pub config: BuildConfig,
}

impl EncoderPipeline {
    /// Fails on configurations that cannot be honoured, before any work is done.
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn encode(&self, inputs: &EncoderInputs) -> Result<EncodeOutput> {
        let full = build_full_code_list(&inputs.divisions, &inputs.mappings, &inputs.freqs);
        info!(chars = inputs.divisions.len(), codes = full.len(), "full codes built");

        let simple = CharSimplifier::new(self.config.char_quotas.clone())
            .with_no_simplify(self.config.no_simplify.iter().cloned())
            .build(&full);
        info!(count = simple.len(), quotas = %self.config.char_quotas, "char abbreviations built");

        let char_codes = primary_code_map(&full);
        let words = build_word_codes(&inputs.words, &char_codes);
        let word_simple = WordSimplifier::new(self.config.word_quotas.clone())?
            .with_key_alphabet(&self.config.key_alphabet)
            .build(&words);
        info!(words = words.len(), simple = word_simple.len(), "word codes built");

        let (lexicon, lexicon_simple) = match &inputs.lexicon {
            Some(entries) => {
                let codes = build_word_codes(entries, &char_codes);
                let simple = WordSimplifier::without_backfill(self.config.lexicon_quotas.clone())
                    .with_key_alphabet(&self.config.key_alphabet)
                    .build(&codes);
                info!(words = codes.len(), simple = simple.len(), "lexicon codes built");
                (codes, simple)
            }
            None => (Vec::new(), Vec::new()),
        };

        let preset = build_preset(&simple);

        Ok(EncodeOutput {
            full,
            simple,
            words,
            word_simple,
            lexicon,
            lexicon_simple,
            preset,
        })
    }

    /// Candidate streams in table order: pinned, char simple, char full, word simple, word full.
    ///
    /// With `verbatim` every stream keeps its codes untouched.
    pub fn candidate_streams(&self, output: &EncodeOutput, pinned: &[MergedEntry], verbatim: bool) -> Vec<CodeStream> {
        let policy = |p: SuffixPolicy| if verbatim { SuffixPolicy::Never } else { p };
        let (word_simple, word_full) = output.word_streams();
        vec![
            CodeStream::new(SourceTag::Pinned, SuffixPolicy::Never, pinned.to_vec()),
            CodeStream::new(
                SourceTag::CharSimple,
                SuffixPolicy::Never,
                output.simple_by_code().iter().map(MergedEntry::from).collect(),
            ),
            CodeStream::new(
                SourceTag::CharFull,
                policy(self.config.full_code_policy),
                output.full.iter().map(MergedEntry::from).collect(),
            ),
            CodeStream::new(
                SourceTag::WordSimple,
                policy(SuffixPolicy::Always),
                word_simple.iter().map(MergedEntry::from).collect(),
            ),
            CodeStream::new(
                SourceTag::WordFull,
                policy(SuffixPolicy::Always),
                word_full.iter().map(MergedEntry::from).collect(),
            ),
        ]
    }

    /// Merged candidate table with collision suffixes.
    pub fn merge_candidates(&self, output: &EncodeOutput, pinned: &[MergedEntry], verbatim: bool) -> Vec<MergedEntry> {
        let streams = self.candidate_streams(output, pinned, verbatim);
        let merged = merge_streams(&Disambiguator::from_config(&self.config), &streams);
        info!(entries = merged.len(), verbatim, "candidate table merged");
        merged
    }
}
