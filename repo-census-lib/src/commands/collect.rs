use super::Host;
use super::common::{LogLevel, init_logging};
use crate::Result;
use crate::census::{Census, CensusPaths};
use crate::cloc::ClocCli;
use crate::forge::GitHub;
use crate::repos::repo_list;
use crate::stats::JsonFileStore;
use crate::sync::GitCli;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use url::Url;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Path to the repository list
    #[arg(long, value_name = "PATH", default_value = "repos.json")]
    pub repos: PathBuf,

    /// Directory receiving statistics, logs, mirrors, extractions and cloc reports
    #[arg(long, value_name = "PATH", default_value = "data")]
    pub data_dir: PathBuf,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_API_KEY", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", default_value = "https://api.github.com")]
    pub api_url: Url,

    /// Base URL repositories are cloned from
    #[arg(long, value_name = "URL", default_value = "https://github.com")]
    pub clone_base_url: Url,

    /// git executable
    #[arg(long, value_name = "PATH", default_value = "git")]
    pub git: PathBuf,

    /// cloc executable
    #[arg(long, value_name = "PATH", default_value = "cloc")]
    pub cloc: PathBuf,

    /// Set the logging level for the log file
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

/// Run a full census over the repository list.
///
/// # Errors
///
/// Returns an error if the repository list is unusable or the data directory cannot be
/// prepared. Failures of individual repositories are reported on the output instead.
pub async fn process_collect<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    fs::create_dir_all(&args.data_dir)
        .into_app_err_with(|| format!("could not create data directory '{}'", args.data_dir.display()))?;

    let paths = CensusPaths::new(&args.data_dir);
    init_logging(args.log_level, &paths.log_file())?;

    let entries = repo_list::load(&args.repos)?;
    repo_list::validate(&entries)?;

    let token = args.github_token.as_deref().filter(|t| !t.is_empty());
    if token.is_none() {
        log::warn!(target: LOG_TARGET, "No GitHub token supplied, API requests are subject to the anonymous rate limit");
    }

    let forge = GitHub::new(token, &args.api_url)?;
    let sync = GitCli::new(&args.git, args.clone_base_url.clone());
    let counter = ClocCli::new(&args.cloc);
    let store = JsonFileStore::new(paths.stats_file());
    let mut census = Census::new(forge, sync, counter, store, paths);

    let mut out = host.output();
    let summary = census.run(&entries, &mut out).await?;
    let _ = writeln!(
        out,
        "Processed {} repositories: {} succeeded, {} failed",
        summary.processed,
        summary.succeeded(),
        summary.failed
    );

    Ok(())
}
