use super::LOG_TARGET;
use super::console::{error_line, format_stars, status};
use super::paths::CensusPaths;
use crate::Result;
use crate::cloc::LineCounter;
use crate::forge::Forge;
use crate::repos::{RepoEntry, RepoId, SliceSettings};
use crate::slices::{copy_chunked, reset_extraction_root, select_targets};
use crate::stats::StatsStore;
use crate::sync::RepoSync;
use ohno::IntoAppError;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Outcome of a census run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CensusSummary {
    /// Repositories visited, failed ones included.
    pub processed: usize,

    /// Repositories whose processing stopped with an error.
    pub failed: usize,
}

impl CensusSummary {
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.processed - self.failed
    }
}

/// Drives the census over a repository list.
#[derive(Debug)]
pub struct Census<F, V, L, S> {
    forge: F,
    sync: V,
    counter: L,
    store: S,
    paths: CensusPaths,
}

impl<F, V, L, S> Census<F, V, L, S>
where
    F: Forge,
    V: RepoSync,
    L: LineCounter,
    S: StatsStore,
{
    pub const fn new(forge: F, sync: V, counter: L, store: S, paths: CensusPaths) -> Self {
        Self {
            forge,
            sync,
            counter,
            store,
            paths,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn paths(&self) -> &CensusPaths {
        &self.paths
    }

    /// Survey every repository of `entries` in order, writing a summary per repository to `out`.
    ///
    /// The statistics store is cleared first. A repository that fails is reported and
    /// skipped; statistics it recorded before failing are kept.
    ///
    /// # Errors
    ///
    /// Only setup failures are returned: clearing the store or creating the code directory.
    pub async fn run(&mut self, entries: &[RepoEntry], out: &mut impl Write) -> Result<CensusSummary> {
        self.store.clear()?;

        let code_dir = self.paths.code_dir();
        fs::create_dir_all(&code_dir).into_app_err_with(|| format!("could not create directory '{}'", code_dir.display()))?;

        let mut summary = CensusSummary::default();
        for entry in entries {
            let _ = writeln!(out, "{}:", entry.repo);

            if let Err(e) = self.process_repo(entry, out).await {
                log::error!(target: LOG_TARGET, "Could not process repository '{}': {e:#}", entry.repo);
                let _ = writeln!(out, "  FAIL: {}", error_line(&e));
                summary.failed += 1;
            }

            let _ = writeln!(out);
            summary.processed += 1;
        }

        log::info!(
            target: LOG_TARGET,
            "Census complete: {} repositories processed, {} failed",
            summary.processed,
            summary.failed
        );

        Ok(summary)
    }

    async fn process_repo(&mut self, entry: &RepoEntry, out: &mut impl Write) -> Result<()> {
        let repo = &entry.repo;
        let id = repo.as_str();
        log::info!(target: LOG_TARGET, "Processing repository '{repo}'");

        self.store.update(id, &["tags"], Value::from(entry.tags.clone()))?;

        let metadata = self.forge.repository(repo).await?;
        for (key, value) in metadata.stats() {
            self.store.update(id, &[key], value)?;
        }
        let _ = writeln!(out, "  stars: {}", format_stars(metadata.stargazers_count));

        let contributors = self.forge.contributors(repo).await?;
        self.store.update(id, &["contributors"], Value::from(contributors.len()))?;
        let _ = writeln!(out, "  contributors: {}", contributors.len());

        let repo_dir = self.paths.repo_dir(repo);
        let synced = self.sync.sync(repo, &repo_dir).await;
        let _ = writeln!(out, "  git clone/pull: {}", status(synced));

        for (slice, settings) in entry.slices.iter() {
            let Some(settings) = settings else {
                log::debug!(target: LOG_TARGET, "Slice '{slice}' of '{repo}' is disabled");
                continue;
            };

            self.process_slice(repo, &repo_dir, slice, settings, out).await?;
        }

        Ok(())
    }

    async fn process_slice(
        &mut self,
        repo: &RepoId,
        repo_dir: &Path,
        slice: &str,
        settings: &SliceSettings,
        out: &mut impl Write,
    ) -> Result<()> {
        let root = self.paths.extraction_root(repo, slice);

        let targets = {
            let root = root.clone();
            let repo_dir = repo_dir.to_path_buf();
            let settings = settings.clone();
            tokio::task::spawn_blocking(move || {
                reset_extraction_root(&root)?;
                select_targets(&repo_dir, &settings)
            })
            .await
            .into_app_err("slice selection task failed")??
        };
        let _ = writeln!(out, "  copy files: {}", targets.len());

        let outcome = tokio::task::spawn_blocking(move || copy_chunked(&targets, &root))
            .await
            .into_app_err("slice copy task failed")??;
        let _ = writeln!(out, "  extract {slice}: OK");

        if outcome.files_copied == 0 {
            log::info!(target: LOG_TARGET, "Slice '{slice}' of '{repo}' selected no files, not counting lines");
            let _ = writeln!(out, "  count {slice}: SKIP");
            return Ok(());
        }

        let report_file = self.paths.report_file(repo, slice);
        let report = self.counter.count(&outcome.root, &report_file).await?;
        self.store.update(repo.as_str(), &["cloc", slice], report.to_value()?)?;
        let _ = writeln!(out, "  count {slice}: OK");

        Ok(())
    }
}
