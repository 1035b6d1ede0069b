//! Channel extraction run.
//!
//! DESIGN
//! ======
//! A run lists twice as many uploads as requested so that videos already in
//! the ledger can be skipped without coming up short, then walks the list in
//! channel order until `num_videos` videos produced comments.
//!
//! ERROR HANDLING
//! ==============
//! Listing failures abort the run. Retryable per-video comment failures are
//! retried with exponential back-off and then skipped. Other failures skip
//! the video at once. One bad video never fails the whole channel. A video
//! with zero comments is remembered in the ledger but does not count toward
//! `num_videos`.

use std::path::Path;

use tracing::{info, warn};

use super::channel::channel_id_from_url;
use super::csv_export::{to_records, write_video_csv};
use super::ledger::{Ledger, ScrapedVideo};
use super::ytdlp::{CommentSource, RawComment, VideoEntry};
use crate::config::ExtractTuning;
use crate::error::{ErrorCode, ExtractError};

/// Parameters of one extraction request.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub channel_url: &'a str,
    pub num_videos: usize,
    /// Re-scrape videos even if the ledger already has them.
    pub force: bool,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub channel_id: String,
    /// Videos whose comments were written to CSV during this run.
    pub processed: Vec<ScrapedVideo>,
    /// Videos examined that turned out to have no comments.
    pub empty_videos: usize,
    /// Videos skipped because the ledger already had them.
    pub skipped_existing: usize,
    /// Videos that failed every attempt.
    pub failed: usize,
}

impl RunReport {
    #[must_use]
    pub fn total_comments(&self) -> usize {
        self.processed.iter().map(|v| v.total_comments).sum()
    }

    /// Videos examined in this run, with or without comments.
    #[must_use]
    pub fn videos_examined(&self) -> usize {
        self.processed.len() + self.empty_videos
    }
}

/// Run one channel extraction.
///
/// # Errors
///
/// Returns `NoVideos` if the listing is empty, the listing error if the
/// channel cannot be listed, or an I/O error if CSV or ledger writes fail.
pub async fn extract_channel(
    source: &dyn CommentSource,
    ledger: &mut Ledger,
    extracted_dir: &Path,
    tuning: ExtractTuning,
    request: RunRequest<'_>,
) -> Result<RunReport, ExtractError> {
    let channel_id = channel_id_from_url(request.channel_url);
    info!(
        %channel_id,
        requested = request.num_videos,
        already_scraped = ledger.len(),
        force = request.force,
        "starting channel extraction"
    );

    let videos = source
        .list_videos(request.channel_url, request.num_videos.saturating_mul(2))
        .await?;
    if videos.is_empty() {
        return Err(ExtractError::NoVideos);
    }

    let mut report = RunReport { channel_id, ..RunReport::default() };
    for (position, video) in videos.iter().enumerate() {
        if report.processed.len() >= request.num_videos {
            break;
        }
        if !request.force && ledger.contains(&video.id) {
            info!(video_id = %video.id, position = position + 1, "skipping already scraped video");
            report.skipped_existing += 1;
            continue;
        }

        info!(
            video_id = %video.id,
            title = %video.title,
            progress = report.processed.len() + 1,
            of = request.num_videos,
            "processing video"
        );
        let Some(comments) = fetch_with_retry(source, video, tuning).await else {
            report.failed += 1;
            continue;
        };

        let mut scraped = ScrapedVideo {
            video_id: video.id.clone(),
            channel_id: report.channel_id.clone(),
            video_url: video.url.clone(),
            title: video.title.clone(),
            upload_date: video.upload_date.clone(),
            total_comments: comments.len(),
            csv_path: None,
            seq: 0,
        };

        if comments.is_empty() {
            info!(video_id = %video.id, "video has no comments");
            ledger.record(scraped).await?;
            report.empty_videos += 1;
            continue;
        }

        let records = to_records(&comments, tuning.max_comment_chars);
        let path = write_video_csv(extracted_dir, &video.id, &records).await?;
        info!(video_id = %video.id, comments = records.len(), path = %path.display(), "comments saved");
        scraped.csv_path = Some(path);
        ledger.record(scraped.clone()).await?;
        report.processed.push(scraped);
    }

    if report.processed.is_empty() {
        warn!(
            channel_id = %report.channel_id,
            skipped_existing = report.skipped_existing,
            empty_videos = report.empty_videos,
            failed = report.failed,
            "no comments extracted from any video"
        );
    } else {
        info!(
            channel_id = %report.channel_id,
            videos = report.processed.len(),
            comments = report.total_comments(),
            "channel extraction finished"
        );
    }
    Ok(report)
}

async fn fetch_with_retry(source: &dyn CommentSource, video: &VideoEntry, tuning: ExtractTuning) -> Option<Vec<RawComment>> {
    for attempt in 1..=tuning.max_attempts {
        match source.fetch_comments(&video.url).await {
            Ok(comments) => return Some(comments),
            Err(e) if !e.retryable() => {
                warn!(video_id = %video.id, error = %e, code = e.error_code(), "comment extraction failed; not retryable, skipping video");
                return None;
            }
            Err(e) if attempt < tuning.max_attempts => {
                let delay = tuning.backoff_for(attempt);
                warn!(
                    video_id = %video.id,
                    error = %e,
                    code = e.error_code(),
                    attempt,
                    total = tuning.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "comment extraction failed; retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!(video_id = %video.id, error = %e, "comment extraction failed after retries; skipping video");
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "scraper_test.rs"]
mod tests;
