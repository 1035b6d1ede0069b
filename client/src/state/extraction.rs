//! Extraction lifecycle state: in-flight flags, status line, and results.
//!
//! DESIGN
//! ======
//! The page drives every transition through the methods below so the status
//! text and busy flags always change together. The latest analytics are
//! cached in `localStorage` under [`ANALYTICS_KEY`] and cleared with the
//! server history.

#[cfg(test)]
#[path = "extraction_test.rs"]
mod extraction_test;

use crate::net::types::{ChannelAnalytics, CommentRow};
use crate::state::form::FormState;
use crate::util::channel::channel_id_from_url;
use crate::util::storage;

pub const ANALYTICS_KEY: &str = "yt-analytics";

pub const STATUS_EXTRACTING: &str = "Extracting comments...";
pub const STATUS_EXTRACT_FAILED: &str = "Extraction failed";
pub const STATUS_PREPARING_DOWNLOAD: &str = "Preparing download...";
pub const STATUS_DOWNLOAD_STARTED: &str = "Download started! Check your downloads folder.";
pub const STATUS_DOWNLOAD_FAILED: &str = "Download failed";
pub const STATUS_CLEARED: &str = "Data cleared. You can now extract fresh data.";

/// Visual tone of the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Danger,
    Success,
    Secondary,
}

impl StatusTone {
    /// Failures read as danger and completions ("Extracted", "Download started")
    /// as success; progress messages stay secondary.
    pub fn of(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("failed") {
            Self::Danger
        } else if lower.contains("success") || lower.starts_with("extracted") || lower.starts_with("download started") {
            Self::Success
        } else {
            Self::Secondary
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Danger => "status status--danger",
            Self::Success => "status status--success",
            Self::Secondary => "status status--secondary",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionState {
    pub loading: bool,
    pub downloading: bool,
    pub clearing: bool,
    pub confirm_clear_open: bool,
    pub status: String,
    pub analytics: Option<ChannelAnalytics>,
    pub comments: Vec<CommentRow>,
}

impl ExtractionState {
    pub fn is_busy(&self) -> bool {
        self.loading || self.downloading || self.clearing
    }

    pub fn can_extract(&self, form: &FormState) -> bool {
        !self.loading && form.validate().is_ok()
    }

    /// Download needs a finished extraction to point at.
    pub fn can_download(&self, form: &FormState) -> bool {
        !self.loading && !self.downloading && self.analytics.is_some() && form.validate().is_ok()
    }

    pub fn can_clear(&self) -> bool {
        !self.loading && !self.clearing
    }

    pub fn status_tone(&self) -> Option<StatusTone> {
        (!self.status.is_empty()).then(|| StatusTone::of(&self.status))
    }

    pub fn begin_extract(&mut self) {
        self.loading = true;
        self.status = STATUS_EXTRACTING.to_owned();
        self.analytics = None;
        self.comments.clear();
    }

    /// Record a completed run. An empty channel id from the server is
    /// replaced with the one derived from the submitted URL.
    pub fn finish_extract(&mut self, mut analytics: ChannelAnalytics, channel_url: &str) {
        if analytics.channel_id.trim().is_empty() {
            analytics.channel_id = channel_id_from_url(channel_url);
        }
        self.loading = false;
        self.status = format!(
            "Extracted {} comments from {} videos",
            analytics.total_comments, analytics.num_scraped_videos
        );
        self.analytics = Some(analytics);
    }

    pub fn fail_extract(&mut self) {
        self.loading = false;
        self.status = STATUS_EXTRACT_FAILED.to_owned();
    }

    pub fn set_comments(&mut self, comments: Vec<CommentRow>) {
        self.comments = comments;
    }

    pub fn begin_download(&mut self) {
        self.downloading = true;
        self.status = STATUS_PREPARING_DOWNLOAD.to_owned();
    }

    pub fn finish_download(&mut self) {
        self.downloading = false;
        self.status = STATUS_DOWNLOAD_STARTED.to_owned();
    }

    pub fn fail_download(&mut self) {
        self.downloading = false;
        self.status = STATUS_DOWNLOAD_FAILED.to_owned();
    }

    pub fn open_confirm_clear(&mut self) {
        if self.can_clear() {
            self.confirm_clear_open = true;
        }
    }

    pub fn cancel_confirm_clear(&mut self) {
        if !self.clearing {
            self.confirm_clear_open = false;
        }
    }

    pub fn begin_clear(&mut self) {
        self.clearing = true;
    }

    pub fn finish_clear(&mut self) {
        self.clearing = false;
        self.confirm_clear_open = false;
        self.analytics = None;
        self.comments.clear();
        self.status = STATUS_CLEARED.to_owned();
    }

    pub fn fail_clear(&mut self) {
        self.clearing = false;
        self.confirm_clear_open = false;
    }

    /// Show cached analytics unless a run already produced fresh ones.
    pub fn restore_cached(&mut self, cached: Option<ChannelAnalytics>) {
        if self.analytics.is_none() {
            self.analytics = cached;
        }
    }
}

pub fn load_cached_analytics() -> Option<ChannelAnalytics> {
    storage::load_json(ANALYTICS_KEY)
}

/// Persist the latest analytics, or drop the cache once they are cleared.
pub fn save_cached_analytics(analytics: Option<&ChannelAnalytics>) {
    match analytics {
        Some(analytics) => storage::save_json(ANALYTICS_KEY, analytics),
        None => storage::remove(ANALYTICS_KEY),
    }
}
