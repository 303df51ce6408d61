use super::Host;
use crate::Result;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Example repository list written by `init`.
pub const DEFAULT_REPOS_JSON: &str = include_str!("../../default_repos.json");

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output repository list path
    #[arg(value_name = "PATH", default_value = "repos.json")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn init_repos<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!("'{}' already exists, use --force to overwrite it", args.output.display());
    }

    fs::write(&args.output, DEFAULT_REPOS_JSON)
        .into_app_err_with(|| format!("could not write repository list '{}'", args.output.display()))?;

    let _ = writeln!(host.output(), "Generated example repository list: {}", args.output.display());
    Ok(())
}
