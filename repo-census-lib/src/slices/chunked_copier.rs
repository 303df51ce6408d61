use super::LOG_TARGET;
use super::random_name::random_name;
use crate::Result;
use ohno::{IntoAppError, bail};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum number of files placed in one chunk directory.
pub const MAX_CHUNK_FILES: usize = 1000;

/// What a chunked copy produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// The extraction root the chunks were created in.
    pub root: PathBuf,

    /// Chunk directories, in creation order.
    pub chunks: Vec<PathBuf>,

    /// Number of files copied across all chunks.
    pub files_copied: usize,
}

/// Remove an extraction root left over from a previous run, if any.
pub fn reset_extraction_root(root: &Path) -> Result<()> {
    match fs::remove_dir_all(root) {
        Ok(()) => {
            log::debug!(target: LOG_TARGET, "Removed previous extraction directory '{}'", root.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).into_app_err_with(|| format!("could not remove extraction directory '{}'", root.display())),
    }
}

/// Copy `files` into randomly named chunk directories under `root`.
///
/// Chunks hold at most [`MAX_CHUNK_FILES`] files and are filled in input order. Each copy is
/// named `<random>_<original file name>` so files sharing a name never collide. Nothing is
/// created when `files` is empty. The first failing copy aborts; chunks written so far stay.
pub fn copy_chunked(files: &[PathBuf], root: &Path) -> Result<CopyOutcome> {
    copy_in_chunks(files, root, MAX_CHUNK_FILES)
}

fn copy_in_chunks(files: &[PathBuf], root: &Path, max_chunk_files: usize) -> Result<CopyOutcome> {
    let mut outcome = CopyOutcome {
        root: root.to_path_buf(),
        chunks: Vec::new(),
        files_copied: 0,
    };

    if files.is_empty() {
        return Ok(outcome);
    }

    fs::create_dir_all(root).into_app_err_with(|| format!("could not create extraction directory '{}'", root.display()))?;

    let mut current_chunk = PathBuf::new();
    let mut chunk_files = 0;

    for file in files {
        if outcome.chunks.is_empty() || chunk_files >= max_chunk_files {
            current_chunk = root.join(random_name());
            fs::create_dir_all(&current_chunk)
                .into_app_err_with(|| format!("could not create chunk directory '{}'", current_chunk.display()))?;
            outcome.chunks.push(current_chunk.clone());
            chunk_files = 0;
        }

        let Some(file_name) = file.file_name() else {
            bail!("'{}' does not name a file", file.display());
        };

        let mut target_name = OsString::from(random_name());
        target_name.push("_");
        target_name.push(file_name);
        let target = current_chunk.join(target_name);

        let _ = fs::copy(file, &target)
            .into_app_err_with(|| format!("could not copy '{}' to '{}'", file.display(), target.display()))?;

        chunk_files += 1;
        outcome.files_copied += 1;
    }

    log::debug!(
        target: LOG_TARGET,
        "Copied {} file(s) into {} chunk(s) under '{}'",
        outcome.files_copied,
        outcome.chunks.len(),
        root.display()
    );

    Ok(outcome)
}
