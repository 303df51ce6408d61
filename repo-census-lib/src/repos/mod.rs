//! The list of repositories to survey.
//!
//! Each [`RepoEntry`] names a repository by its forge identifier ([`RepoId`]), carries
//! free-form tags that are copied into the statistics document, and defines the named
//! slices of the repository whose files are extracted and line-counted.

mod repo_entry;
mod repo_id;
pub mod repo_list;

pub use repo_entry::{RepoEntry, SliceSettings, Slices};
pub use repo_id::RepoId;
