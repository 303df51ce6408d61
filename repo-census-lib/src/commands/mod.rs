//! Command-line interface for repo-census
//!
//! Three commands are available:
//!
//! - **collect**: survey every repository of the list, rebuilding the statistics file from
//!   scratch and printing a per-repository summary
//! - **validate**: check a repository list without touching the network
//! - **init**: write an example repository list
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. All output goes through [`Host`] so the commands can be
//! exercised in tests without a real terminal or process exit.

mod collect;
mod common;
mod host;
mod init;
mod run;
mod validate;

pub use collect::{CollectArgs, process_collect};
pub use common::{LogLevel, init_logging};
pub use host::Host;
pub use init::{DEFAULT_REPOS_JSON, InitArgs, init_repos};
pub use run::run;
pub use validate::{ValidateArgs, validate_repos};
