//! Comment source backed by the `yt-dlp` command-line tool.
//!
//! ARCHITECTURE
//! ============
//! The scraper only sees the `CommentSource` trait, so route and scraper
//! tests run against an in-memory fake while production shells out to
//! `yt-dlp` and parses its `-J` JSON dump.
//!
//! TRADE-OFFS
//! ==========
//! Each call spawns a fresh process. That is slow compared to a long-lived
//! extractor, but it keeps the server free of YouTube-specific parsing and
//! lets operators upgrade `yt-dlp` independently.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::channel::{videos_tab_url, watch_url};
use crate::error::ExtractError;

// =============================================================================
// TYPES
// =============================================================================

/// One upload from a channel's "Videos" tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub upload_date: Option<String>,
}

/// A top-level comment as reported by `yt-dlp`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawComment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, rename = "like_count", deserialize_with = "null_as_default")]
    pub likes: i64,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Source of channel listings and per-video comments.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// List up to `limit` uploads from the channel, newest first.
    async fn list_videos(&self, channel_url: &str, limit: usize) -> Result<Vec<VideoEntry>, ExtractError>;

    /// Fetch every top-level comment of one video.
    async fn fetch_comments(&self, video_url: &str) -> Result<Vec<RawComment>, ExtractError>;
}

// =============================================================================
// YT-DLP PROCESS
// =============================================================================

pub struct YtDlp {
    bin: String,
    timeout: Duration,
}

impl YtDlp {
    #[must_use]
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self { bin: bin.into(), timeout }
    }

    async fn run_json(&self, args: &[&str]) -> Result<Vec<u8>, ExtractError> {
        debug!(bin = %self.bin, ?args, "spawning yt-dlp");
        let child = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExtractError::Spawn { bin: self.bin.clone(), source })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractError::Timeout { secs: self.timeout.as_secs() })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            warn!(status = ?output.status.code(), %stderr, "yt-dlp exited with failure");
            return Err(ExtractError::Tool { stderr });
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl CommentSource for YtDlp {
    async fn list_videos(&self, channel_url: &str, limit: usize) -> Result<Vec<VideoEntry>, ExtractError> {
        let url = videos_tab_url(channel_url);
        let playlist_end = limit.to_string();
        info!(%url, limit, "fetching channel video list");
        let stdout = self
            .run_json(&["--flat-playlist", "-J", "--no-warnings", "--playlist-end", &playlist_end, &url])
            .await?;
        let mut videos = parse_playlist(&stdout)?;
        videos.truncate(limit);
        info!(count = videos.len(), "channel video list fetched");
        Ok(videos)
    }

    async fn fetch_comments(&self, video_url: &str) -> Result<Vec<RawComment>, ExtractError> {
        info!(%video_url, "extracting comments");
        let stdout = self
            .run_json(&[
                "-J",
                "--no-warnings",
                "--skip-download",
                "--write-comments",
                "--extractor-args",
                "youtube:max_comments=all;comment_sort=top",
                video_url,
            ])
            .await?;
        parse_comments(&stdout)
    }
}

// =============================================================================
// JSON PARSING
// =============================================================================

#[derive(Deserialize)]
struct PlaylistDump {
    #[serde(default)]
    entries: Option<Vec<Option<PlaylistEntry>>>,
}

#[derive(Deserialize)]
struct PlaylistEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    upload_date: Option<String>,
}

#[derive(Deserialize)]
struct VideoDump {
    #[serde(default)]
    comments: Option<Vec<Option<RawComment>>>,
}

/// Parse a `--flat-playlist -J` dump. Entries without an id are dropped.
///
/// # Errors
///
/// Returns `ToolOutput` if the document is not JSON or has no `entries`.
pub fn parse_playlist(raw: &[u8]) -> Result<Vec<VideoEntry>, ExtractError> {
    let dump: PlaylistDump = serde_json::from_slice(raw).map_err(|e| ExtractError::ToolOutput(e.to_string()))?;
    let Some(entries) = dump.entries else {
        return Err(ExtractError::ToolOutput("no video entries in channel info".into()));
    };

    Ok(entries
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let id = entry.id.filter(|id| !id.is_empty())?;
            Some(VideoEntry {
                url: watch_url(&id),
                title: entry
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled".to_owned()),
                upload_date: entry.upload_date.filter(|d| !d.is_empty()),
                id,
            })
        })
        .collect())
}

/// Parse a single-video `-J --write-comments` dump. A video without a
/// `comments` array has no comments.
///
/// # Errors
///
/// Returns `ToolOutput` if the document is not JSON.
pub fn parse_comments(raw: &[u8]) -> Result<Vec<RawComment>, ExtractError> {
    let dump: VideoDump = serde_json::from_slice(raw).map_err(|e| ExtractError::ToolOutput(e.to_string()))?;
    Ok(dump.comments.unwrap_or_default().into_iter().flatten().collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "ytdlp_test.rs"]
mod tests;
