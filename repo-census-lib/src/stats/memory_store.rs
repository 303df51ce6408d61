use super::merge::{StatsDocument, set_path};
use super::{StatsStore, stat_path};
use crate::Result;
use serde_json::Value;

/// A statistics store that lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: StatsDocument,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStore {
    fn clear(&mut self) -> Result<()> {
        self.document.clear();
        Ok(())
    }

    fn update(&mut self, repo: &str, stat: &[&str], value: Value) -> Result<()> {
        let path = stat_path(repo, stat)?;
        set_path(&mut self.document, &path, value);
        Ok(())
    }

    fn read(&self) -> Result<StatsDocument> {
        Ok(self.document.clone())
    }
}
