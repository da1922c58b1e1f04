//! LL encoder — code-table generation for a component-based input method.
//!
//! Stages:
//! 1. Full codes from component decompositions (parallel, then sorted)
//! 2. Char abbreviations under per-length quotas
//! 3. Word full codes from primary char codes
//! 4. Word abbreviations with placeholder back-fill
//! 5. Collision suffixes over the merged candidate streams

pub mod char_simple;
pub mod disambiguate;
pub mod full_code;
pub mod pipeline;
pub mod preset;
pub mod word_code;
pub mod word_simple;

pub use char_simple::CharSimplifier;
pub use disambiguate::{disambiguate, merge_streams, CodeStream, Disambiguator};
pub use full_code::{build_full_code_list, full_code, primary_code_map};
pub use pipeline::{EncodeOutput, EncoderInputs, EncoderPipeline};
pub use preset::{build_preset, PresetRow};
pub use word_code::{build_word_codes, word_code};
pub use word_simple::{sort_word_simple_codes, WordSimplifier};
