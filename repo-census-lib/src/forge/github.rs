use super::client::Client;
use super::{Contributor, Forge, LOG_TARGET, RepoMetadata};
use crate::Result;
use crate::repos::RepoId;
use ohno::EnrichableExt;
use url::Url;

/// Contributors requested per page; the API maximum.
const CONTRIBUTORS_PAGE_SIZE: u32 = 100;

/// The GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHub {
    client: Client,
}

impl GitHub {
    pub fn new(token: Option<&str>, api_url: &Url) -> Result<Self> {
        Ok(Self {
            client: Client::new(token, api_url.as_str())?,
        })
    }

    fn repo_url(&self, repo: &RepoId, suffix: &str) -> String {
        format!("{}/repos/{}/{}{suffix}", self.client.base_url(), repo.owner(), repo.name())
    }
}

impl Forge for GitHub {
    async fn repository(&self, repo: &RepoId) -> Result<RepoMetadata> {
        let url = self.repo_url(repo, "");
        self.client
            .get_json(&url)
            .await
            .map_err(|e| e.enrich_with(|| format!("could not fetch metadata for repository '{repo}'")))
    }

    async fn contributors(&self, repo: &RepoId) -> Result<Vec<Contributor>> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.repo_url(repo, &format!("/contributors?anon=true&per_page={CONTRIBUTORS_PAGE_SIZE}&page={page}"));
            let batch: Vec<Contributor> = self
                .client
                .get_json(&url)
                .await
                .map_err(|e| e.enrich_with(|| format!("could not fetch contributors for repository '{repo}'")))?;

            if batch.is_empty() {
                break;
            }

            log::debug!(target: LOG_TARGET, "Fetched {} contributor(s) on page {page} for '{repo}'", batch.len());
            all.extend(batch);
            page += 1;
        }

        Ok(all)
    }
}
