//! Dataset integrity checks run before any article is processed.
//!
//! # Responsibility
//! - Gate corpus scanning on the raw/meta pairing layout.
//!
//! # Invariants
//! - Validation only reads the directory listing; it never opens article files.
//! - Each failure kind is distinguishable by the caller.

mod validate;

pub use validate::{
    meta_file_name, raw_file_name, validate_dataset, DatasetError, DatasetResult,
    META_FILE_SUFFIX, RAW_FILE_SUFFIX,
};
