//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The server serializes these exact structs, so a field added here shows up
//! on both sides of the API at once. Counts decode leniently because cached
//! analytics in `localStorage` may predate the current schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::util::channel::average_comments;

/// Per-run summary of a channel extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAnalytics {
    /// Handle or last path segment of the channel URL.
    pub channel_id: String,
    /// Videos examined this run, including ones without comments.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_videos: usize,
    /// Videos that yielded at least one comment.
    #[serde(deserialize_with = "deserialize_count")]
    pub num_scraped_videos: usize,
    /// Comments extracted across all scraped videos.
    #[serde(deserialize_with = "deserialize_count")]
    pub total_comments: usize,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub avg_comments_per_video: usize,
}

impl ChannelAnalytics {
    pub fn new(
        channel_id: impl Into<String>,
        total_videos: usize,
        num_scraped_videos: usize,
        total_comments: usize,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            total_videos,
            num_scraped_videos,
            total_comments,
            avg_comments_per_video: average_comments(total_comments, num_scraped_videos),
        }
    }

    /// Average recomputed from the counts, so stale cached values are ignored.
    pub fn average(&self) -> usize {
        average_comments(self.total_comments, self.num_scraped_videos)
    }
}

/// Body of a successful `GET /api/extract_channel`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub status: String,
    pub analytics: ChannelAnalytics,
}

impl ExtractResponse {
    pub fn success(analytics: ChannelAnalytics) -> Self {
        Self { status: "success".to_owned(), analytics }
    }
}

/// One extracted comment as previewed in the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    pub author: String,
    pub text: String,
    pub likes: i64,
    #[serde(default)]
    pub video_title: String,
}

/// Body of a successful `POST /api/clear_scraped_data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub videos_forgotten: usize,
    #[serde(default)]
    pub files_removed: usize,
}

/// Error body returned by every failing API route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return usize::try_from(int).map_err(|_| D::Error::custom("count out of range"));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float >= 0.0
                && float <= usize::MAX as f64
            {
                return Ok(float.round() as usize);
            }
            Err(D::Error::custom("expected non-negative count"))
        }
        serde_json::Value::Null => Ok(0),
        _ => Err(D::Error::custom("expected number")),
    }
}
