//! Local repository mirrors
//!
//! Each repository is mirrored under the code directory so slices can be extracted from a
//! working copy. A missing mirror is cloned; an existing one is pulled.

mod git;

pub use git::{DEFAULT_GIT_TIMEOUT, GitCli};

use crate::repos::RepoId;
use std::path::Path;

const LOG_TARGET: &str = "      sync";

/// Brings a local working copy of a repository up to date.
pub trait RepoSync {
    /// Clone `repo` into `path` if it does not exist yet, pull otherwise.
    ///
    /// Returns whether the working copy is now current. Failures are logged, never returned.
    fn sync(&self, repo: &RepoId, path: &Path) -> impl Future<Output = bool> + Send;
}
