use crate::error::Result;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// One unit of pending crawl work: a normalized URL and its BFS depth
/// from the start URL. Entries are never updated once enqueued - first
/// insertion wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

/// The persisted BFS work queue. The on-disk copy is rewritten after
/// every pop and after every push batch, so it is the resumption
/// checkpoint: killing the process at any point loses at most the one
/// in-flight fetch, never the rest of the queue.
pub struct Frontier {
    path: PathBuf,
    entries: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Loads the queue from disk, FIFO order preserved. A missing file is
    /// an empty frontier. Malformed lines are skipped, not fatal.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut entries = VecDeque::new();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
                match parse_entry(line) {
                    Some(entry) => entries.push_back(entry),
                    None => warn!("skipping malformed frontier line: {}", line),
                }
            }
            info!(
                "loaded frontier with {} pending URLs from {}",
                entries.len(),
                path.display()
            );
        } else {
            info!(
                "{} does not exist, starting with an empty frontier",
                path.display()
            );
        }

        Ok(Self { path, entries })
    }

    pub fn push_back(&mut self, entry: FrontierEntry) {
        self.entries.push_back(entry);
    }

    pub fn pop_front(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    /// Linear scan over pending entries only; the caller checks the
    /// visited set separately. O(queue length) is an accepted cost at the
    /// queue sizes an I2P crawl produces.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| entry.url == url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the full queue to disk, one `url|depth` line per entry, via
    /// a temp file renamed over the original.
    pub fn persist(&self) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let mut file = File::create(&tmp)?;
        for entry in &self.entries {
            writeln!(file, "{}|{}", entry.url, entry.depth)?;
        }
        file.sync_data()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_entry(line: &str) -> Option<FrontierEntry> {
    let (url, depth) = line.split_once('|')?;
    let depth = depth.parse().ok()?;
    Some(FrontierEntry {
        url: url.to_string(),
        depth,
    })
}
