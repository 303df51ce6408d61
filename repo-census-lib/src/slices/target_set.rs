use super::glob_resolver;
use crate::Result;
use crate::repos::SliceSettings;
use ohno::IntoAppError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Select the files of a slice: everything the include patterns match, minus
/// everything the exclude patterns match, minus directories.
pub fn select_targets(repo_root: &Path, settings: &SliceSettings) -> Result<Vec<PathBuf>> {
    let include = glob_resolver::resolve(repo_root, &settings.include)?;
    if include.is_empty() {
        return Ok(include);
    }

    let exclude = glob_resolver::resolve(repo_root, &settings.exclude)?;
    build_target_set(include, &exclude)
}

/// `include − exclude` by exact path equality, keeping the order of `include` and
/// dropping directories.
pub fn build_target_set(include: Vec<PathBuf>, exclude: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let excluded: HashSet<&Path> = exclude.iter().map(PathBuf::as_path).collect();
    let mut targets = Vec::with_capacity(include.len());

    for path in include {
        if excluded.contains(path.as_path()) {
            continue;
        }

        let metadata = fs::metadata(&path).into_app_err_with(|| format!("reading metadata of '{}'", path.display()))?;
        if !metadata.is_dir() {
            targets.push(path);
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_excludes_test_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.ts");
        touch(tmp.path(), "a.test.ts");
        touch(tmp.path(), "b.ts");

        let settings = SliceSettings::new(["*.ts"], ["*.test.ts"]);
        let targets = select_targets(tmp.path(), &settings).unwrap();
        assert_eq!(names(tmp.path(), &targets), ["a.ts", "b.ts"]);
    }

    #[test]
    fn test_exclude_matching_nothing_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.ts");
        touch(tmp.path(), "b.ts");

        let settings = SliceSettings::new(["*.ts"], ["*.go", "vendor/**/*"]);
        let targets = select_targets(tmp.path(), &settings).unwrap();
        assert_eq!(names(tmp.path(), &targets), ["a.ts", "b.ts"]);
    }

    #[test]
    fn test_overlapping_includes_yield_each_file_once() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "src/a.rs");
        touch(tmp.path(), "src/b.rs");

        let settings = SliceSettings::new(["src/*.rs", "src/**/*.rs", "src/a.rs"], Vec::<String>::new());
        let targets = select_targets(tmp.path(), &settings).unwrap();
        assert_eq!(names(tmp.path(), &targets), ["src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn test_directories_are_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "src/lib.rs");
        touch(tmp.path(), "README.md");

        let settings = SliceSettings::new(["*", "src"], Vec::<String>::new());
        let targets = select_targets(tmp.path(), &settings).unwrap();
        assert_eq!(names(tmp.path(), &targets), ["README.md"]);
    }

    #[test]
    fn test_no_target_is_excluded_or_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        for rel in ["src/a.rs", "src/b.rs", "src/gen/c.rs", "src/gen/d.rs", "tests/e.rs", "build.rs"] {
            touch(tmp.path(), rel);
        }

        let settings = SliceSettings::new(["**/*", "**/*.rs"], ["src/gen/*", "build.rs"]);
        let targets = select_targets(tmp.path(), &settings).unwrap();
        let excluded = glob_resolver::resolve(tmp.path(), &settings.exclude).unwrap();

        assert!(!targets.is_empty());
        assert!(targets.iter().all(|t| !excluded.contains(t)));
        assert!(targets.iter().all(|t| !t.is_dir()));

        let unique: HashSet<_> = targets.iter().collect();
        assert_eq!(unique.len(), targets.len());
    }

    #[test]
    fn test_exclude_directory_subtree() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "src/a.rs");
        touch(tmp.path(), "src/gen/b.rs");
        touch(tmp.path(), "src/gen/nested/c.rs");

        let settings = SliceSettings::new(["src/**/*.rs"], ["src/gen/**"]);
        let targets = select_targets(tmp.path(), &settings).unwrap();
        assert_eq!(names(tmp.path(), &targets), ["src/a.rs"]);
    }

    #[test]
    fn test_hidden_files_only_with_dot_patterns() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), ".eslintrc.js");
        touch(tmp.path(), "index.js");

        let settings = SliceSettings::new(["*.js"], Vec::<String>::new());
        assert_eq!(names(tmp.path(), &select_targets(tmp.path(), &settings).unwrap()), ["index.js"]);

        let settings = SliceSettings::new(["*.js", ".*.js"], Vec::<String>::new());
        assert_eq!(
            names(tmp.path(), &select_targets(tmp.path(), &settings).unwrap()),
            ["index.js", ".eslintrc.js"]
        );
    }

    #[test]
    fn test_empty_include_gives_empty_set() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.ts");

        let settings = SliceSettings::new(["*.py"], ["*.ts"]);
        assert!(select_targets(tmp.path(), &settings).unwrap().is_empty());
    }

    #[test]
    fn test_missing_repository_gives_empty_set() {
        let tmp = tempfile::tempdir().unwrap();

        let settings = SliceSettings::new(["**/*"], Vec::<String>::new());
        assert!(select_targets(&tmp.path().join("absent"), &settings).unwrap().is_empty());
    }

    #[test]
    fn test_build_target_set_missing_path_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let ghost = tmp.path().join("ghost.rs");

        let error_msg = build_target_set(vec![ghost], &[]).unwrap_err().to_string();
        assert!(error_msg.contains("ghost.rs"));
    }

    #[test]
    fn test_build_target_set_difference_is_exact() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.rs");
        touch(tmp.path(), "b.rs");
        let a = tmp.path().join("a.rs");
        let b = tmp.path().join("b.rs");

        let targets = build_target_set(vec![a.clone(), b.clone()], &[a, tmp.path().join("c.rs")]).unwrap();
        assert_eq!(targets, [b]);
    }
}
