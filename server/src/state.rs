//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The scrape ledger sits behind a `tokio::sync::Mutex`; holding that lock
//! for the whole run serializes extractions so two requests never write the
//! same per-video CSV or race on the ledger file.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::services::ledger::Ledger;
use crate::services::ytdlp::CommentSource;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub source: Arc<dyn CommentSource>,
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, source: Arc<dyn CommentSource>, ledger: Ledger) -> Self {
        Self { config: Arc::new(config), source, ledger: Arc::new(Mutex::new(ledger)) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::config::{CorsOrigin, ExtractTuning};
    use crate::error::ExtractError;
    use crate::services::channel::{video_id_from_url, watch_url};
    use crate::services::ytdlp::{RawComment, VideoEntry};

    /// In-memory `CommentSource`. Videos are listed in insertion order;
    /// `failures` makes the first N fetches of a video fail with a retryable
    /// error; `broken` videos always fail as if yt-dlp were missing.
    #[derive(Default)]
    pub struct FakeSource {
        pub videos: Vec<VideoEntry>,
        pub comments: HashMap<String, Vec<RawComment>>,
        pub failures: StdMutex<HashMap<String, u32>>,
        pub broken: Vec<String>,
        pub fetch_calls: StdMutex<Vec<String>>,
        pub list_limits: StdMutex<Vec<usize>>,
    }

    impl FakeSource {
        #[must_use]
        pub fn with_video(mut self, id: &str, comment_count: usize) -> Self {
            self.videos.push(VideoEntry {
                id: id.into(),
                title: format!("Video {id}"),
                url: watch_url(id),
                upload_date: Some("20240101".into()),
            });
            let comments = (0..comment_count)
                .map(|i| RawComment {
                    id: format!("{id}-c{i}"),
                    text: format!("comment {i} on {id}"),
                    author: format!("@user{i}"),
                    likes: i64::try_from(i).unwrap_or_default(),
                    timestamp: Some(1_700_000_000),
                })
                .collect();
            self.comments.insert(id.into(), comments);
            self
        }

        #[must_use]
        pub fn failing(self, id: &str, times: u32) -> Self {
            self.failures.lock().unwrap().insert(id.into(), times);
            self
        }

        #[must_use]
        pub fn broken(mut self, id: &str) -> Self {
            self.broken.push(id.into());
            self
        }

        pub fn fetched(&self) -> Vec<String> {
            self.fetch_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommentSource for FakeSource {
        async fn list_videos(&self, _channel_url: &str, limit: usize) -> Result<Vec<VideoEntry>, ExtractError> {
            self.list_limits.lock().unwrap().push(limit);
            Ok(self.videos.iter().take(limit).cloned().collect())
        }

        async fn fetch_comments(&self, video_url: &str) -> Result<Vec<RawComment>, ExtractError> {
            let id = video_id_from_url(video_url).unwrap_or_default().to_owned();
            self.fetch_calls.lock().unwrap().push(id.clone());
            if self.broken.contains(&id) {
                return Err(ExtractError::Spawn {
                    bin: "yt-dlp".into(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            {
                let mut failures = self.failures.lock().unwrap();
                if let Some(remaining) = failures.get_mut(&id) {
                    if *remaining > 0 {
                        *remaining -= 1;
                        return Err(ExtractError::Tool { stderr: "HTTP Error 429".into() });
                    }
                }
            }
            Ok(self.comments.get(&id).cloned().unwrap_or_default())
        }
    }

    /// Tuning with millisecond back-off so retry tests stay fast.
    #[must_use]
    pub fn fast_tuning() -> ExtractTuning {
        ExtractTuning { max_attempts: 3, backoff_base: Duration::from_millis(1), max_comment_chars: 2000 }
    }

    #[must_use]
    pub fn test_config(data_dir: &Path) -> ServerConfig {
        ServerConfig {
            port: 0,
            data_dir: data_dir.to_path_buf(),
            ytdlp_bin: "yt-dlp".into(),
            ytdlp_timeout: Duration::from_secs(5),
            cors_origin: CorsOrigin::Any,
            tuning: fast_tuning(),
        }
    }

    /// Build an `AppState` over `source` with its data directory at `data_dir`.
    pub async fn test_app_state(data_dir: &Path, source: Arc<dyn CommentSource>) -> AppState {
        let config = test_config(data_dir);
        let ledger = Ledger::load(config.ledger_path()).await;
        AppState::new(config, source, ledger)
    }
}
