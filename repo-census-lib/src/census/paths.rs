use crate::path_utils::sanitize_path_component;
use crate::repos::RepoId;
use std::path::PathBuf;

/// Layout of the data directory.
///
/// ```text
/// <data>/stats.json                              statistics document
/// <data>/app.log                                 log file
/// <data>/code/<owner>/<name>                     repository mirrors
/// <data>/extract/<owner>/<name>/<slice>          extracted slices
/// <data>/cloc/<owner>-<name>-<slice>.json        raw cloc reports
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusPaths {
    data_dir: PathBuf,
}

impl CensusPaths {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    #[must_use]
    pub fn stats_file(&self) -> PathBuf {
        self.data_dir.join("stats.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("app.log")
    }

    #[must_use]
    pub fn code_dir(&self) -> PathBuf {
        self.data_dir.join("code")
    }

    #[must_use]
    pub fn extract_dir(&self) -> PathBuf {
        self.data_dir.join("extract")
    }

    #[must_use]
    pub fn cloc_dir(&self) -> PathBuf {
        self.data_dir.join("cloc")
    }

    /// Where the working copy of `repo` lives.
    #[must_use]
    pub fn repo_dir(&self, repo: &RepoId) -> PathBuf {
        self.code_dir()
            .join(sanitize_path_component(repo.owner()))
            .join(sanitize_path_component(repo.name()))
    }

    /// Where `slice` of `repo` is extracted to.
    #[must_use]
    pub fn extraction_root(&self, repo: &RepoId, slice: &str) -> PathBuf {
        self.extract_dir()
            .join(sanitize_path_component(repo.owner()))
            .join(sanitize_path_component(repo.name()))
            .join(sanitize_path_component(slice))
    }

    /// Where the cloc report for `slice` of `repo` is written.
    #[must_use]
    pub fn report_file(&self, repo: &RepoId, slice: &str) -> PathBuf {
        self.cloc_dir().join(format!(
            "{}-{}-{}.json",
            sanitize_path_component(repo.owner()),
            sanitize_path_component(repo.name()),
            sanitize_path_component(slice)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn repo() -> RepoId {
        RepoId::parse("vercel/next.js").unwrap()
    }

    #[test]
    fn test_fixed_files() {
        let paths = CensusPaths::new("data");
        assert_eq!(paths.stats_file(), Path::new("data").join("stats.json"));
        assert_eq!(paths.log_file(), Path::new("data").join("app.log"));
    }

    #[test]
    fn test_repo_dir() {
        let paths = CensusPaths::new("data");
        assert_eq!(paths.repo_dir(&repo()), Path::new("data").join("code").join("vercel").join("next.js"));
    }

    #[test]
    fn test_extraction_root() {
        let paths = CensusPaths::new("data");
        assert_eq!(
            paths.extraction_root(&repo(), "src"),
            Path::new("data").join("extract").join("vercel").join("next.js").join("src")
        );
    }

    #[test]
    fn test_report_file() {
        let paths = CensusPaths::new("data");
        assert_eq!(
            paths.report_file(&repo(), "src"),
            Path::new("data").join("cloc").join("vercel-next.js-src.json")
        );
    }

    #[test]
    fn test_slice_names_cannot_escape() {
        let paths = CensusPaths::new("data");
        let root = paths.extraction_root(&repo(), "../../etc");

        assert!(root.starts_with(paths.extract_dir()));
        assert_eq!(root.file_name().unwrap(), "______etc");
    }
}
