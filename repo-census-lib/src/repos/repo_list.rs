use super::RepoEntry;
use crate::Result;
use crate::slices::GlobPattern;
use ohno::{EnrichableExt, IntoAppError, bail};
use std::fs;
use std::path::Path;

const LOG_TARGET: &str = "     repos";

/// Load the repository list, sorted by repository identifier.
///
/// The list is a JSON array of [`RepoEntry`] objects. Duplicate identifiers are rejected.
pub fn load(path: &Path) -> Result<Vec<RepoEntry>> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading repository list '{}'", path.display()))?;
    let entries = parse(&text).map_err(|e| e.enrich_with(|| format!("parsing repository list '{}'", path.display())))?;

    log::debug!(target: LOG_TARGET, "Loaded {} repositories from '{}'", entries.len(), path.display());
    Ok(entries)
}

/// Parse a repository list document, sorted by repository identifier.
pub fn parse(text: &str) -> Result<Vec<RepoEntry>> {
    let mut entries: Vec<RepoEntry> = serde_json::from_str(text)?;
    entries.sort_by(|a, b| a.repo.cmp(&b.repo));

    if let Some(pair) = entries.windows(2).find(|pair| pair[0].repo == pair[1].repo) {
        bail!("repository '{}' is listed more than once", pair[0].repo);
    }

    Ok(entries)
}

/// Check that every glob pattern of every configured slice compiles.
pub fn validate(entries: &[RepoEntry]) -> Result<()> {
    for entry in entries {
        for (slice, settings) in entry.slices.iter() {
            let Some(settings) = settings else {
                continue;
            };

            for pattern in settings.include.iter().chain(&settings.exclude) {
                let _ = GlobPattern::new(pattern)
                    .map_err(|e| e.enrich_with(|| format!("in slice '{slice}' of repository '{}'", entry.repo)))?;
            }
        }
    }

    Ok(())
}
