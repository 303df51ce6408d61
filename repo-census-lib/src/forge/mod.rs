//! Code-forge metadata
//!
//! The [`Forge`] trait is the seam between the census and the hosting service. [`GitHub`]
//! implements it over the GitHub REST API: repository metadata comes from
//! `GET /repos/{owner}/{repo}` and the contributor list from the paginated
//! `GET /repos/{owner}/{repo}/contributors?anon=true` endpoint.
//!
//! Throttling responses are retried inside the client; everything else that is not a 200
//! surfaces as an error.

pub mod client;
mod forge_data;
mod github;

pub use forge_data::{Contributor, ContributorKind, Nullable, RepoMetadata};
pub use github::GitHub;

use crate::Result;
use crate::repos::RepoId;

const LOG_TARGET: &str = "     forge";

/// A source of repository metadata.
pub trait Forge {
    /// Fetch the metadata of `repo`.
    fn repository(&self, repo: &RepoId) -> impl Future<Output = Result<RepoMetadata>> + Send;

    /// Fetch every contributor record of `repo`, anonymous contributors included.
    fn contributors(&self, repo: &RepoId) -> impl Future<Output = Result<Vec<Contributor>>> + Send;
}
