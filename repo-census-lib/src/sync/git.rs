use super::{LOG_TARGET, RepoSync};
use crate::Result;
use crate::process::{check_output, run_with_timeout};
use crate::repos::RepoId;
use core::time::Duration;
use ohno::IntoAppError;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tokio::process::Command;
use url::Url;

/// Default upper bound on a single clone or pull.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_mins(30);

/// Keeps working copies in sync by running the `git` command-line tool.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    clone_base: Url,
    timeout: Duration,
}

impl GitCli {
    /// Use the git executable `program`, cloning from `<clone_base>/<owner>/<name>.git`.
    #[must_use]
    pub fn new(program: impl Into<OsString>, clone_base: Url) -> Self {
        Self {
            program: program.into(),
            clone_base,
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn sync_core(&self, repo: &RepoId, path: &Path) -> Result<()> {
        let start_time = std::time::Instant::now();

        if path.exists() {
            log::info!(target: LOG_TARGET, "Pulling repository '{repo}' in '{}'", path.display());

            let mut command = Command::new(&self.program);
            let _ = command.arg("-C").arg(path).arg("pull");
            let output = run_with_timeout(command, self.timeout).await?;
            check_output(&output, "git pull")?;
        } else {
            let url = repo.clone_url(&self.clone_base)?;
            log::info!(target: LOG_TARGET, "Cloning repository '{url}' into '{}'", path.display());

            fs::create_dir_all(path).into_app_err_with(|| format!("could not create directory '{}'", path.display()))?;

            let mut command = Command::new(&self.program);
            let _ = command.arg("clone").arg(url.as_str()).arg(path);
            let output = run_with_timeout(command, self.timeout).await?;
            check_output(&output, "git clone")?;
        }

        log::debug!(target: LOG_TARGET, "Synchronized '{repo}' in {:.3}s", start_time.elapsed().as_secs_f64());
        Ok(())
    }
}

impl RepoSync for GitCli {
    async fn sync(&self, repo: &RepoId, path: &Path) -> bool {
        match self.sync_core(repo, path).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not synchronize repository '{repo}': {e:#}");
                false
            }
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Write a stand-in for git that records its arguments and exits with `exit_code`.
    fn fake_git(dir: &Path, exit_code: i32) -> (PathBuf, PathBuf) {
        let script = dir.join("fake-git");
        let log = dir.join("git-calls.log");
        fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" >> '{}'\necho 'fatal: nope' >&2\nexit {exit_code}\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        (script, log)
    }

    fn git(program: &Path) -> GitCli {
        GitCli::new(program, Url::parse("https://github.com").unwrap())
    }

    fn repo() -> RepoId {
        RepoId::parse("octo/widget").unwrap()
    }

    #[tokio::test]
    async fn test_missing_path_is_created_and_cloned() {
        let tmp = tempfile::tempdir().unwrap();
        let (script, log) = fake_git(tmp.path(), 0);
        let target = tmp.path().join("code").join("octo").join("widget");

        assert!(git(&script).sync(&repo(), &target).await);

        assert!(target.is_dir());
        let calls = fs::read_to_string(log).unwrap();
        assert_eq!(calls.trim(), format!("clone https://github.com/octo/widget.git {}", target.display()));
    }

    #[tokio::test]
    async fn test_existing_path_is_pulled() {
        let tmp = tempfile::tempdir().unwrap();
        let (script, log) = fake_git(tmp.path(), 0);
        let target = tmp.path().join("widget");
        fs::create_dir_all(&target).unwrap();

        assert!(git(&script).sync(&repo(), &target).await);

        let calls = fs::read_to_string(log).unwrap();
        assert_eq!(calls.trim(), format!("-C {} pull", target.display()));
    }

    #[tokio::test]
    async fn test_clone_uses_configured_base() {
        let tmp = tempfile::tempdir().unwrap();
        let (script, log) = fake_git(tmp.path(), 0);
        let target = tmp.path().join("widget");

        let sync = GitCli::new(&script, Url::parse("https://git.example.com/mirror/").unwrap());
        assert!(sync.sync(&repo(), &target).await);

        let calls = fs::read_to_string(log).unwrap();
        assert!(calls.starts_with("clone https://git.example.com/mirror/octo/widget.git "), "{calls}");
    }

    #[tokio::test]
    async fn test_failure_returns_false() {
        let tmp = tempfile::tempdir().unwrap();
        let (script, _) = fake_git(tmp.path(), 128);
        let target = tmp.path().join("widget");
        fs::create_dir_all(&target).unwrap();

        assert!(!git(&script).sync(&repo(), &target).await);
    }

    #[tokio::test]
    async fn test_missing_program_returns_false() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("widget");

        assert!(!git(&tmp.path().join("no-such-git")).sync(&repo(), &target).await);
    }

    #[tokio::test]
    async fn test_timeout_returns_false() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("slow-git");
        fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let target = tmp.path().join("widget");
        fs::create_dir_all(&target).unwrap();

        let sync = git(&script).with_timeout(Duration::from_millis(200));
        assert!(!sync.sync(&repo(), &target).await);
    }
}
