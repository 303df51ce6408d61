//! Per-repository orchestration
//!
//! A census walks the repository list one repository at a time:
//!
//! 1. record the tags,
//! 2. fetch and record forge metadata and the contributor count,
//! 3. clone or pull the working copy,
//! 4. for every enabled slice: reset its extraction directory, select its files, copy them
//!    into chunks, count lines, and record the report under `cloc.<slice>`.
//!
//! Failures are contained per repository. A failed sync is reported but does not stop the
//! slices from being extracted from whatever working copy is present.

mod collector;
mod console;
mod paths;

pub use collector::{Census, CensusSummary};
pub use console::format_stars;
pub use paths::CensusPaths;

const LOG_TARGET: &str = "    census";
