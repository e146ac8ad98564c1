use crate::classify::{LinkKind, classify};
use crate::error::{CrawlError, Result};
use crate::extract::extract_links;
use crate::fetch::{build_client, fetch_with_retry};
use crate::frontier::{Frontier, FrontierEntry};
use crate::normalize::{normalize_url, resolve_and_normalize};
use crate::store::RecordStore;
use reqwest::Client;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const VISITED_FILE: &str = "visited.txt";
pub const PHONEBOOK_FILE: &str = "phonebook.txt";
pub const QUEUE_FILE: &str = "queue.txt";
pub const ONIONS_FILE: &str = "onions.txt";
pub const CLEARWEB_FILE: &str = "clearweb.txt";

pub type ProgressCallback = Arc<dyn Fn(String, u32) + Send + Sync>;

/// Everything the crawl loop needs to know up front. No module-level
/// globals: configuration is threaded through explicitly.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: String,
    /// HTTP proxy of the local I2P router as host:port. `None` connects
    /// directly, which only makes sense for clearweb debugging and tests.
    pub proxy: Option<String>,
    /// Maximum BFS depth. Zero or negative crawls without a depth limit.
    pub max_depth: i64,
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
    pub politeness_delay: Duration,
    pub request_timeout: Duration,
    /// Directory holding the frontier and the four record files.
    pub state_dir: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: "http://identiguy.i2p".to_string(),
            proxy: Some("127.0.0.1:4444".to_string()),
            max_depth: 5,
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(5),
            politeness_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(240),
            state_dir: PathBuf::from("."),
        }
    }
}

/// Counters reported after a run drains the frontier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlSummary {
    pub pages_visited: usize,
    pub eepsites_queued: usize,
    pub onion_links_found: usize,
    pub clearweb_links_found: usize,
    pub fetch_failures: usize,
}

pub struct Crawler {
    config: CrawlConfig,
    client: Client,
    visited_store: RecordStore,
    phonebook_store: RecordStore,
    onion_store: RecordStore,
    clearweb_store: RecordStore,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let client = build_client(config.proxy.as_deref(), config.request_timeout)?;
        let dir = &config.state_dir;
        Ok(Self {
            client,
            visited_store: RecordStore::new(dir.join(VISITED_FILE)),
            phonebook_store: RecordStore::new(dir.join(PHONEBOOK_FILE)),
            onion_store: RecordStore::new(dir.join(ONIONS_FILE)),
            clearweb_store: RecordStore::new(dir.join(CLEARWEB_FILE)),
            progress_callback: None,
            config,
        })
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Runs the crawl until the frontier drains, resuming whatever a
    /// previous run left on disk. Fetch failures skip the entry; I/O
    /// failures on durable state abort the run, since resumability is
    /// gone once persistence cannot be trusted.
    pub async fn run(&self) -> Result<CrawlSummary> {
        let mut visited = self.visited_store.load()?;
        let mut phonebook = self.phonebook_store.load()?;
        let mut onions = self.onion_store.load()?;
        let mut clearweb = self.clearweb_store.load()?;
        let mut frontier = Frontier::load(self.config.state_dir.join(QUEUE_FILE))?;

        let start = Url::parse(&self.config.start_url)
            .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", self.config.start_url, e)))?;
        let start = normalize_url(start);
        if frontier.is_empty() && !visited.contains(&start) {
            info!("frontier empty and start URL unvisited, seeding {} at depth 0", start);
            frontier.push_back(FrontierEntry { url: start, depth: 0 });
            frontier.persist()?;
        }

        let mut summary = CrawlSummary::default();

        while let Some(entry) = frontier.pop_front() {
            // The popped entry leaves the persisted frontier immediately.
            // A crash mid-fetch loses this one URL, never the queue.
            frontier.persist()?;

            if visited.contains(&entry.url) {
                debug!("skipping already visited {}", entry.url);
                continue;
            }

            info!(
                "crawling {} (depth {}, {} pending)",
                entry.url,
                entry.depth,
                frontier.len()
            );
            if let Some(callback) = &self.progress_callback {
                callback(entry.url.clone(), entry.depth);
            }

            let Some(response) = fetch_with_retry(
                &self.client,
                &entry.url,
                self.config.max_attempts,
                self.config.retry_base_delay,
            )
            .await
            else {
                // Not visited and not re-queued. Only a future page that
                // links here will put it back on the frontier.
                warn!("all attempts failed for {}, dropping it for this run", entry.url);
                summary.fetch_failures += 1;
                continue;
            };

            info!(
                "{} responded with status {} ({} bytes)",
                entry.url,
                response.status,
                response.body.len()
            );

            visited.insert(entry.url.clone());
            self.visited_store.append(&entry.url)?;
            summary.pages_visited += 1;

            if classify(&entry.url) == LinkKind::Eepsite && !phonebook.contains(&entry.url) {
                debug!("adding live eepsite to phonebook: {}", entry.url);
                phonebook.insert(entry.url.clone());
                self.phonebook_store.append(&entry.url)?;
            }

            let mut queued = 0usize;
            let mut new_onions = 0usize;
            let mut new_clearweb = 0usize;

            if let Ok(base) = Url::parse(&entry.url) {
                for href in extract_links(&response.body) {
                    let Some(link) = resolve_and_normalize(&base, &href) else {
                        continue;
                    };
                    match classify(&link) {
                        LinkKind::Eepsite => {
                            let depth = entry.depth + 1;
                            if self.config.max_depth > 0 && i64::from(depth) > self.config.max_depth
                            {
                                debug!(
                                    "not queueing {}: depth {} exceeds limit {}",
                                    link, depth, self.config.max_depth
                                );
                                continue;
                            }
                            if !visited.contains(&link) && !frontier.contains(&link) {
                                debug!("queueing {} at depth {}", link, depth);
                                frontier.push_back(FrontierEntry { url: link, depth });
                                queued += 1;
                            }
                        }
                        LinkKind::Onion => {
                            if !onions.contains(&link) {
                                debug!("new onion link: {}", link);
                                onions.insert(link.clone());
                                self.onion_store.append(&link)?;
                                new_onions += 1;
                            }
                        }
                        LinkKind::Clearweb => {
                            if !clearweb.contains(&link) {
                                debug!("new clearweb link: {}", link);
                                clearweb.insert(link.clone());
                                self.clearweb_store.append(&link)?;
                                new_clearweb += 1;
                            }
                        }
                    }
                }
            }

            frontier.persist()?;
            summary.eepsites_queued += queued;
            summary.onion_links_found += new_onions;
            summary.clearweb_links_found += new_clearweb;
            info!(
                "queued {} eepsites, found {} new onion and {} new clearweb links ({} pending)",
                queued,
                new_onions,
                new_clearweb,
                frontier.len()
            );

            tokio::time::sleep(self.config.politeness_delay).await;
        }

        info!("frontier drained after {} pages", summary.pages_visited);
        if !phonebook.is_empty() {
            self.phonebook_store.rewrite_sorted(&phonebook)?;
        }
        if !onions.is_empty() {
            self.onion_store.rewrite_sorted(&onions)?;
        }
        if !clearweb.is_empty() {
            self.clearweb_store.rewrite_sorted(&clearweb)?;
        }

        Ok(summary)
    }
}
