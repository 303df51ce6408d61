//! Command dispatch logic for repo-census

use super::{CollectArgs, InitArgs, ValidateArgs, init_repos, process_collect, validate_repos};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-census", version, author, long_about = None)]
#[command(about = "Collect hosting metadata and line counts for a list of repositories")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CensusSubcommand,
}

#[derive(Subcommand, Debug)]
enum CensusSubcommand {
    /// Survey every repository in the list and rebuild the statistics file
    Collect(Box<CollectArgs>),
    /// Validate a repository list
    Validate(ValidateArgs),
    /// Generate an example repository list
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        CensusSubcommand::Collect(collect_args) => process_collect(host, collect_args).await,
        CensusSubcommand::Validate(validate_args) => validate_repos(host, validate_args),
        CensusSubcommand::Init(init_args) => init_repos(host, init_args),
    }
}
