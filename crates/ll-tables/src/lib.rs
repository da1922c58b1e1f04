//! Table loading and serialization for the LL code-table generator.
//!
//! - `repository`: per-run file-content cache
//! - `readers`: division table, component map, frequency and word lists
//! - `validate`: undefined-component check
//! - `writers`: line formats of every output table

pub mod readers;
pub mod repository;
pub mod validate;
pub mod writers;

pub use readers::{
    read_char_freq, read_component_map, read_division_table, read_pinned, read_root_entries, read_words,
};
pub use repository::TableRepository;
pub use validate::validate_division_components;
pub use writers::{TableFile, DAZHU_MAX_BYTES};
