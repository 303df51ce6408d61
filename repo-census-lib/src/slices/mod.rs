//! Slice extraction
//!
//! A slice is a named subset of a repository's files, described by include and exclude
//! glob patterns. Extraction happens in three steps:
//!
//! 1. [`glob_resolver`] expands both pattern lists against the repository root.
//! 2. [`target_set`] subtracts the exclude matches from the include matches and drops
//!    directories, giving the ordered, duplicate-free target set.
//! 3. [`chunked_copier`] copies the target set into a fresh extraction directory, split
//!    into randomly named chunk directories of at most [`MAX_CHUNK_FILES`] files.
//!
//! Everything here is blocking filesystem work; async callers should run it on a blocking
//! thread.

pub mod chunked_copier;
pub mod glob_resolver;
mod random_name;
pub mod target_set;

pub use chunked_copier::{CopyOutcome, MAX_CHUNK_FILES, copy_chunked, reset_extraction_root};
pub use glob_resolver::GlobPattern;
pub use random_name::{NAME_LEN, random_name};
pub use target_set::select_targets;

const LOG_TARGET: &str = "    slices";
