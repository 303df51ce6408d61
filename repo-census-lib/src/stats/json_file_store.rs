use super::merge::{StatsDocument, set_path};
use super::{LOG_TARGET, StatsStore, stat_path};
use crate::Result;
use ohno::IntoAppError;
use serde_json::Value;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Statistics document persisted as pretty-printed JSON.
///
/// Every update rewrites the whole file. The new content goes to a sibling temporary file
/// that is then renamed over the document, so readers see either the old or the new version.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(|| OsString::from("stats"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, document: &StatsDocument) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
        }

        let temp_path = self.temp_path();
        let file = File::create(&temp_path).into_app_err_with(|| format!("unable to create '{}'", temp_path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, document)
            .into_app_err_with(|| format!("unable to write statistics to '{}'", temp_path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("unable to flush '{}'", temp_path.display()))?;
        drop(writer);

        fs::rename(&temp_path, &self.path)
            .into_app_err_with(|| format!("unable to replace statistics file '{}'", self.path.display()))
    }
}

impl StatsStore for JsonFileStore {
    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!(target: LOG_TARGET, "Removed statistics file '{}'", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).into_app_err_with(|| format!("unable to remove statistics file '{}'", self.path.display())),
        }
    }

    fn update(&mut self, repo: &str, stat: &[&str], value: Value) -> Result<()> {
        let path = stat_path(repo, stat)?;
        let mut document = self.read()?;
        set_path(&mut document, &path, value);
        self.write(&document)
    }

    fn read(&self) -> Result<StatsDocument> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StatsDocument::new()),
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to open statistics file '{}'", self.path.display())),
        };

        serde_json::from_reader(BufReader::new(file))
            .into_app_err_with(|| format!("unable to parse statistics file '{}'", self.path.display()))
    }
}
