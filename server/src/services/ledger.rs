//! Scrape history: which videos were already processed.
//!
//! DESIGN
//! ======
//! The ledger is a JSON object keyed by video id, held in memory behind the
//! extraction lock and rewritten on every change. Writes go to a `.tmp`
//! sibling that is renamed over the real file, so a crash mid-write leaves
//! the previous ledger intact.
//!
//! Older deployments stored a bare JSON array of ids. That shape still loads;
//! those ids count as scraped but carry no CSV metadata.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ExtractError;

/// What the ledger remembers about one processed video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrapedVideo {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub total_comments: usize,
    /// Per-video CSV. `None` for videos that had no comments.
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
    /// Insertion order; later records have larger values.
    #[serde(default)]
    pub seq: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LedgerFile {
    Entries(BTreeMap<String, ScrapedVideo>),
    Ids(Vec<String>),
}

/// Outcome of [`Ledger::clear`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearReport {
    pub videos_forgotten: usize,
    pub files_removed: usize,
}

#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: BTreeMap<String, ScrapedVideo>,
}

impl Ledger {
    /// Load the ledger at `path`. A missing file is an empty ledger; an
    /// unreadable one is logged and also treated as empty.
    pub async fn load(path: PathBuf) -> Self {
        let entries = match tokio::fs::read(&path).await {
            Ok(raw) => match serde_json::from_slice::<LedgerFile>(&raw) {
                Ok(LedgerFile::Entries(entries)) => entries,
                Ok(LedgerFile::Ids(ids)) => legacy_entries(ids),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "scrape ledger unreadable; starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "scrape ledger unreadable; starting empty");
                BTreeMap::new()
            }
        };
        info!(path = %path.display(), videos = entries.len(), "scrape ledger loaded");
        Self { path, entries }
    }

    #[must_use]
    pub fn contains(&self, video_id: &str) -> bool {
        self.entries.contains_key(video_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record (or replace) a processed video and persist the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger file cannot be written.
    pub async fn record(&mut self, mut video: ScrapedVideo) -> Result<(), ExtractError> {
        video.seq = self.entries.values().map(|v| v.seq).max().map_or(1, |seq| seq + 1);
        self.entries.insert(video.video_id.clone(), video);
        self.persist().await
    }

    /// Videos of `channel_id` that produced a CSV, oldest record first.
    #[must_use]
    pub fn for_channel(&self, channel_id: &str) -> Vec<&ScrapedVideo> {
        let mut videos: Vec<&ScrapedVideo> = self
            .entries
            .values()
            .filter(|v| v.channel_id == channel_id && v.csv_path.is_some())
            .collect();
        videos.sort_by_key(|v| v.seq);
        videos
    }

    /// Forget every video and delete every file under `extracted_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be removed.
    pub async fn clear(&mut self, extracted_dir: &Path) -> Result<ClearReport, ExtractError> {
        let videos_forgotten = self.entries.len();

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut files_removed = 0;
        match tokio::fs::read_dir(extracted_dir).await {
            Ok(mut dir) => {
                while let Some(entry) = dir.next_entry().await? {
                    if entry.file_type().await?.is_file() {
                        tokio::fs::remove_file(entry.path()).await?;
                        files_removed += 1;
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        // Entries stay until every removal succeeded.
        self.entries.clear();
        info!(videos_forgotten, files_removed, "scrape history cleared");
        Ok(ClearReport { videos_forgotten, files_removed })
    }

    async fn persist(&self) -> Result<(), ExtractError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn legacy_entries(ids: Vec<String>) -> BTreeMap<String, ScrapedVideo> {
    ids.into_iter()
        .filter(|id| !id.is_empty())
        .map(|id| (id.clone(), ScrapedVideo { video_id: id, ..ScrapedVideo::default() }))
        .collect()
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
