//! Line counting
//!
//! Lines are counted by the external `cloc` tool. It writes a JSON report per slice into the
//! data directory; the report is loaded back with its `header` removed and recorded verbatim.

mod report;

pub use report::{ClocReport, LanguageCount, SUM_KEY};

use crate::Result;
use crate::process::{check_output, run_with_timeout};
use core::time::Duration;
use ohno::IntoAppError;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tokio::process::Command;

const LOG_TARGET: &str = "      cloc";

/// Default upper bound on a single cloc run.
pub const DEFAULT_CLOC_TIMEOUT: Duration = Duration::from_mins(30);

/// Counts lines of code in a directory tree.
pub trait LineCounter {
    /// Count the lines below `dir`, leaving the raw report at `report_file`.
    fn count(&self, dir: &Path, report_file: &Path) -> impl Future<Output = Result<ClocReport>> + Send;
}

/// Counts lines by running the `cloc` command-line tool.
#[derive(Debug, Clone)]
pub struct ClocCli {
    program: OsString,
    timeout: Duration,
}

impl ClocCli {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_CLOC_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl LineCounter for ClocCli {
    async fn count(&self, dir: &Path, report_file: &Path) -> Result<ClocReport> {
        if let Some(parent) = report_file.parent() {
            fs::create_dir_all(parent).into_app_err_with(|| format!("could not create directory '{}'", parent.display()))?;
        }

        match fs::remove_file(report_file) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).into_app_err_with(|| format!("could not remove stale cloc report '{}'", report_file.display())),
        }

        log::info!(target: LOG_TARGET, "Counting lines in '{}'", dir.display());

        let mut report_arg = OsString::from("--report-file=");
        report_arg.push(report_file);

        let mut command = Command::new(&self.program);
        let _ = command.arg("--json").arg(report_arg).arg("--quiet").arg(dir);
        let output = run_with_timeout(command, self.timeout).await?;
        check_output(&output, "cloc")?;

        if !report_file.exists() {
            log::debug!(target: LOG_TARGET, "cloc wrote no report for '{}', nothing was recognized", dir.display());
            return Ok(ClocReport::default());
        }

        let report = ClocReport::load(report_file)?;
        log::debug!(target: LOG_TARGET, "Counted {} line(s) of code in '{}'", report.total().code, dir.display());
        Ok(report)
    }
}
