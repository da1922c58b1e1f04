//! Domain types, configuration and errors shared by the LL code-table generator.
//!
//! Nothing in this crate touches the filesystem: table loading lives in
//! `ll-tables`, the encoding engine in `ll-encoder`.

pub mod config;
pub mod error;
pub mod types;

pub use config::{BuildConfig, QuotaTable, SuffixPolicy};
pub use error::{LlError, Result};
pub use types::{
    parse_weight, CharMeta, ComponentMap, Decomposition, DivisionTable, FreqMap, MergedEntry,
    SimpleToken, SourceTag, WordCode, WordEntry, WordSimpleCode, PLACEHOLDER_LIMIT,
};
