use crate::error::Result;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// An append-only, line-oriented record store: one UTF-8 record per line,
/// no escaping. The store itself does not deduplicate - callers check
/// membership in their in-memory set before appending.
///
/// Two persistence modes, by design: cheap durable appends while a run is
/// in progress, and a sorted full rewrite once the frontier drains.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every non-empty line into a set. A missing file is an empty
    /// store, not an error.
    pub fn load(&self) -> Result<HashSet<String>> {
        if !self.path.exists() {
            info!(
                "{} does not exist, starting with an empty set",
                self.path.display()
            );
            return Ok(HashSet::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let records: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        info!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Appends one record, durable before returning.
    pub fn append(&self, record: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record)?;
        file.sync_data()?;
        Ok(())
    }

    /// Replaces the store contents with the set in sorted order, via a
    /// temp file renamed over the original.
    pub fn rewrite_sorted(&self, records: &HashSet<String>) -> Result<()> {
        let mut sorted: Vec<&String> = records.iter().collect();
        sorted.sort();

        let tmp = self.path.with_extension("tmp");
        let mut file = File::create(&tmp)?;
        for record in &sorted {
            writeln!(file, "{}", record)?;
        }
        file.sync_data()?;
        fs::rename(&tmp, &self.path)?;

        info!(
            "sorted and rewrote {} with {} unique records",
            self.path.display(),
            sorted.len()
        );
        Ok(())
    }
}
