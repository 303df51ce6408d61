//! Statistics store
//!
//! All statistics gathered during a census land in one JSON document keyed by repository
//! identifier. Each repository maps statistic names to values; line counts live in a nested
//! `cloc` mapping keyed by slice name:
//!
//! ```json
//! {
//!   "owner/name": {
//!     "tags": ["web"],
//!     "stargazers_count": 1234,
//!     "contributors": 56,
//!     "cloc": { "src": { "Rust": { "nFiles": 2, "blank": 1, "comment": 0, "code": 5 } } }
//!   }
//! }
//! ```
//!
//! Statistic paths are slices of segments rather than dotted strings, so repository and slice
//! names containing `.` are stored verbatim.

mod json_file_store;
mod memory_store;
pub mod merge;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use merge::StatsDocument;

use crate::Result;
use ohno::bail;
use serde_json::Value;

const LOG_TARGET: &str = "     stats";

/// Persistent home of the statistics document.
pub trait StatsStore {
    /// Reset the document to empty. Clearing an already empty store is fine.
    fn clear(&mut self) -> Result<()>;

    /// Set `repo` → `stat[0]` → … → `stat[n-1]` to `value`, creating intermediate mappings
    /// as needed and leaving every sibling key intact.
    ///
    /// # Errors
    ///
    /// Fails if `stat` is empty or the document cannot be read or written.
    fn update(&mut self, repo: &str, stat: &[&str], value: Value) -> Result<()>;

    /// A snapshot of the whole document.
    fn read(&self) -> Result<StatsDocument>;
}

fn stat_path<'a>(repo: &'a str, stat: &[&'a str]) -> Result<Vec<&'a str>> {
    if stat.is_empty() {
        bail!("statistic path for repository '{repo}' is empty");
    }

    let mut path = Vec::with_capacity(stat.len() + 1);
    path.push(repo);
    path.extend_from_slice(stat);
    Ok(path)
}
