use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// An `owner/name` repository identifier as used by the forge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId {
    id: Arc<str>,
    owner: Arc<str>,
    name: Arc<str>,
}

impl RepoId {
    pub fn parse(id: &str) -> Result<Self> {
        let mut segments = id.split('/');
        let (Some(owner), Some(name), None) = (segments.next(), segments.next(), segments.next()) else {
            bail!("invalid repository identifier '{id}': expected 'owner/name'");
        };

        if owner.is_empty() || name.is_empty() {
            bail!("invalid repository identifier '{id}': empty owner or repository name");
        }

        if owner.chars().chain(name.chars()).any(char::is_whitespace) {
            bail!("invalid repository identifier '{id}': whitespace is not allowed");
        }

        Ok(Self {
            id: Arc::from(id),
            owner: Arc::from(owner),
            name: Arc::from(name),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The URL `git clone` uses for this repository, e.g. `https://github.com/owner/name.git`
    pub fn clone_url(&self, base: &Url) -> Result<Url> {
        let base = base.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{}/{}.git", self.owner, self.name))
            .into_app_err_with(|| format!("building clone URL for repository '{self}'"))
    }
}

impl Display for RepoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.id)
    }
}

impl TryFrom<String> for RepoId {
    type Error = ohno::AppError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RepoId> for String {
    fn from(value: RepoId) -> Self {
        value.id.to_string()
    }
}
