//! CSV output: per-video comment files and the combined channel export.
//!
//! Per-video files live at `extracted/{video_id}.csv` with the columns
//! `comment_id,text,author,likes,timestamp`. The channel download
//! concatenates them and appends the channel/video columns.

use std::path::{Path, PathBuf};

use client::net::types::CommentRow;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use super::ledger::ScrapedVideo;
use super::ytdlp::RawComment;
use crate::error::ExtractError;

/// One line of a per-video CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub comment_id: String,
    pub text: String,
    pub author: String,
    pub likes: i64,
    pub timestamp: String,
}

/// One line of the combined channel CSV.
#[derive(Debug, Serialize)]
struct CombinedRecord<'a> {
    comment_id: &'a str,
    text: &'a str,
    author: &'a str,
    likes: i64,
    timestamp: &'a str,
    channel_id: &'a str,
    video_url: &'a str,
    video_title: &'a str,
    upload_date: &'a str,
}

/// Keep at most `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[must_use]
pub fn to_records(comments: &[RawComment], max_chars: usize) -> Vec<CommentRecord> {
    comments
        .iter()
        .map(|c| CommentRecord {
            comment_id: c.id.clone(),
            text: truncate_chars(&c.text, max_chars).to_owned(),
            author: c.author.clone(),
            likes: c.likes,
            timestamp: c.timestamp.map(|t| t.to_string()).unwrap_or_default(),
        })
        .collect()
}

/// Write a per-video CSV to `dir/{video_id}.csv` and return its path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub async fn write_video_csv(dir: &Path, video_id: &str, records: &[CommentRecord]) -> Result<PathBuf, ExtractError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record(["comment_id", "text", "author", "likes", "timestamp"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| ExtractError::Io(e.into_error()))?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{video_id}.csv"));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

async fn read_video_csv(path: &Path) -> Result<Vec<CommentRecord>, ExtractError> {
    let raw = tokio::fs::read(path).await?;
    let mut reader = csv::Reader::from_reader(raw.as_slice());
    let records = reader.deserialize::<CommentRecord>().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Build the combined CSV for every video in `videos`.
///
/// # Errors
///
/// Returns `CsvNotFound` when `videos` is empty or a recorded CSV is gone,
/// and a CSV error when a file is malformed.
pub async fn combine(channel_id: &str, videos: &[&ScrapedVideo]) -> Result<Vec<u8>, ExtractError> {
    if videos.is_empty() {
        return Err(ExtractError::CsvNotFound);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for video in videos {
        let Some(path) = video.csv_path.as_deref() else {
            continue;
        };
        let records = match read_video_csv(path).await {
            Ok(records) => records,
            Err(ExtractError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExtractError::CsvNotFound);
            }
            Err(e) => return Err(e),
        };
        let upload_date = video.upload_date.as_deref().unwrap_or("N/A");
        for record in &records {
            writer.serialize(CombinedRecord {
                comment_id: &record.comment_id,
                text: &record.text,
                author: &record.author,
                likes: record.likes,
                timestamp: &record.timestamp,
                channel_id,
                video_url: &video.video_url,
                video_title: &video.title,
                upload_date,
            })?;
        }
    }
    writer.into_inner().map_err(|e| ExtractError::Io(e.into_error()))
}

/// Read up to `limit` comment previews across `videos`, most-liked first.
///
/// # Errors
///
/// Returns an error if a recorded CSV cannot be read or parsed.
pub async fn read_comments(videos: &[&ScrapedVideo], limit: usize) -> Result<Vec<CommentRow>, ExtractError> {
    let mut rows = Vec::new();
    for video in videos {
        let Some(path) = video.csv_path.as_deref() else {
            continue;
        };
        for record in read_video_csv(path).await? {
            rows.push(CommentRow {
                author: record.author,
                text: record.text,
                likes: record.likes,
                video_title: video.title.clone(),
            });
        }
    }
    rows.sort_by(|a, b| b.likes.cmp(&a.likes));
    rows.truncate(limit);
    Ok(rows)
}

/// Attachment name offered to the browser.
#[must_use]
pub fn combined_filename(channel_id: &str) -> String {
    format!("youtube_comments_{channel_id}_all_videos.csv")
}

/// Archive path for a combined export generated at `now`.
#[must_use]
pub fn combined_archive_path(extracted_dir: &Path, channel_id: &str, now: OffsetDateTime) -> PathBuf {
    let stamp = now
        .format(format_description!("[year][month][day]_[hour][minute][second]"))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    extracted_dir.join(format!("combined_{channel_id}_{stamp}.csv"))
}

#[cfg(test)]
#[path = "csv_export_test.rs"]
mod tests;
