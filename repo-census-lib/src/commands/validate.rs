use super::Host;
use crate::Result;
use crate::repos::{RepoEntry, repo_list};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the repository list
    #[arg(long, value_name = "PATH", default_value = "repos.json")]
    pub repos: PathBuf,
}

fn validate_repos_inner(path: &Path) -> Result<Vec<RepoEntry>> {
    let entries = repo_list::load(path)?;
    repo_list::validate(&entries)?;
    Ok(entries)
}

pub fn validate_repos<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match validate_repos_inner(&args.repos) {
        Ok(entries) => {
            let slices: usize = entries.iter().map(|e| e.slices.iter().filter(|(_, s)| s.is_some()).count()).sum();
            let _ = writeln!(host.output(), "Repository list is valid");
            let _ = writeln!(
                host.output(),
                "{}: {} repositories, {slices} enabled slices",
                args.repos.display(),
                entries.len()
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Repository list validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
