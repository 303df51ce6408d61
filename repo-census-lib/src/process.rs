//! Running external tools with a deadline.

use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Run a command to completion, capturing its output.
///
/// The child is killed if it does not finish within `timeout`.
pub async fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<Output> {
    let description = describe(&command);

    let child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err_with(|| format!("could not spawn '{description}'"))?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(e).into_app_err_with(|| format!("'{description}' failed to run")),
        Err(_) => {
            bail!("'{description}' timed out after {} seconds", timeout.as_secs());
        }
    }
}

/// Turn a non-zero exit status into an error carrying the tool's stderr.
pub fn check_output(output: &Output, operation: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{operation} failed ({}): {}", output.status, stderr.trim());
    }
    Ok(())
}

fn describe(command: &Command) -> String {
    let std_command = command.as_std();
    core::iter::once(std_command.get_program())
        .chain(std_command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitStatus;

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code.cast_unsigned())
    }

    #[test]
    fn test_check_output_success() {
        let output = Output {
            status: exit_status(0),
            stdout: vec![],
            stderr: vec![],
        };

        check_output(&output, "git pull").unwrap();
    }

    #[test]
    fn test_check_output_failure_includes_stderr() {
        let output = Output {
            status: exit_status(1),
            stdout: vec![],
            stderr: b"fatal: not a git repository\n".to_vec(),
        };

        let error_msg = check_output(&output, "git pull").unwrap_err().to_string();
        assert!(error_msg.contains("git pull failed"));
        assert!(error_msg.contains("not a git repository"));
    }

    #[test]
    fn test_describe_joins_program_and_args() {
        let mut command = Command::new("git");
        let _ = command.args(["-C", "/tmp/repo", "pull"]);

        assert_eq!(describe(&command), "git -C /tmp/repo pull");
    }

    #[tokio::test]
    async fn test_run_with_timeout_missing_program() {
        let command = Command::new("repo-census-definitely-not-a-real-program");
        let error_msg = run_with_timeout(command, Duration::from_secs(5)).await.unwrap_err().to_string();
        assert!(error_msg.contains("could not spawn"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_with_timeout_captures_output() {
        let mut command = Command::new("sh");
        let _ = command.args(["-c", "echo hello"]);

        let output = run_with_timeout(command, Duration::from_secs(30)).await.unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_with_timeout_expires() {
        let mut command = Command::new("sh");
        let _ = command.args(["-c", "sleep 5"]);

        let error_msg = run_with_timeout(command, Duration::from_millis(100)).await.unwrap_err().to_string();
        assert!(error_msg.contains("timed out"));
    }
}
