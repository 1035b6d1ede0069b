//! Extraction, comment preview, CSV download, and history reset routes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use client::net::types::{ChannelAnalytics, ClearResponse, CommentRow, ExtractResponse};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::ExtractError;
use crate::services::channel::channel_id_from_url;
use crate::services::csv_export;
use crate::services::ledger::Ledger;
use crate::services::scraper::{self, RunReport, RunRequest};
use crate::state::AppState;

pub const MIN_NUM_VIDEOS: i64 = 1;
pub const MAX_NUM_VIDEOS: i64 = 50;
pub const DEFAULT_COMMENT_LIMIT: usize = 100;
pub const MAX_COMMENT_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    pub channel_url: Option<String>,
    #[serde(default = "default_num_videos")]
    pub num_videos: i64,
    #[serde(default)]
    pub download: bool,
    #[serde(default)]
    pub force: bool,
}

fn default_num_videos() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub channel_url: Option<String>,
    pub limit: Option<usize>,
}

/// `GET /api/extract_channel` — scrape a channel and return analytics, or
/// the combined CSV when `download=true`.
pub async fn extract_channel(
    State(state): State<AppState>,
    query: Result<Query<ExtractQuery>, QueryRejection>,
) -> Result<Response, ExtractError> {
    let Query(query) = query?;
    let channel_url = required_channel_url(query.channel_url.as_deref())?;
    let num_videos = clamp_num_videos(query.num_videos);
    info!(%channel_url, num_videos, download = query.download, force = query.force, "extract request");

    let mut ledger = state.ledger.lock().await;
    let run = scraper::extract_channel(
        state.source.as_ref(),
        &mut ledger,
        &state.config.extracted_dir(),
        state.config.tuning,
        RunRequest { channel_url, num_videos, force: query.force },
    )
    .await;

    if query.download {
        // Earlier runs may already have produced CSVs worth sending.
        if let Err(e) = &run {
            warn!(error = %e, "extraction before download failed; serving recorded CSVs");
        }
        return download_response(&state, &ledger, &channel_id_from_url(channel_url)).await;
    }

    let report = run?;
    Ok(Json(ExtractResponse::success(analytics_for(&report))).into_response())
}

/// `GET /api/comments` — most-liked comments already extracted for a channel.
pub async fn list_comments(
    State(state): State<AppState>,
    query: Result<Query<CommentsQuery>, QueryRejection>,
) -> Result<Json<Vec<CommentRow>>, ExtractError> {
    let Query(query) = query?;
    let channel_url = required_channel_url(query.channel_url.as_deref())?;
    let limit = query.limit.unwrap_or(DEFAULT_COMMENT_LIMIT).clamp(1, MAX_COMMENT_LIMIT);
    let channel_id = channel_id_from_url(channel_url);

    let ledger = state.ledger.lock().await;
    let rows = csv_export::read_comments(&ledger.for_channel(&channel_id), limit).await?;
    Ok(Json(rows))
}

/// `POST /api/clear_scraped_data` — forget every scraped video and delete CSVs.
pub async fn clear_scraped_data(State(state): State<AppState>) -> Result<Json<ClearResponse>, ExtractError> {
    let mut ledger = state.ledger.lock().await;
    let report = ledger.clear(&state.config.extracted_dir()).await?;
    Ok(Json(ClearResponse {
        status: "success".into(),
        message: "All scraped data has been reset".into(),
        videos_forgotten: report.videos_forgotten,
        files_removed: report.files_removed,
    }))
}

async fn download_response(state: &AppState, ledger: &Ledger, channel_id: &str) -> Result<Response, ExtractError> {
    let videos = ledger.for_channel(channel_id);
    let bytes = csv_export::combine(channel_id, &videos).await?;

    let extracted_dir = state.config.extracted_dir();
    tokio::fs::create_dir_all(&extracted_dir).await?;
    let archive = csv_export::combined_archive_path(&extracted_dir, channel_id, OffsetDateTime::now_utc());
    tokio::fs::write(&archive, &bytes).await?;
    info!(%channel_id, videos = videos.len(), path = %archive.display(), "combined CSV written");

    let filename = csv_export::combined_filename(channel_id);
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        bytes,
    )
        .into_response())
}

pub(crate) fn analytics_for(report: &RunReport) -> ChannelAnalytics {
    ChannelAnalytics::new(
        report.channel_id.clone(),
        report.videos_examined(),
        report.processed.len(),
        report.total_comments(),
    )
}

pub(crate) fn required_channel_url(raw: Option<&str>) -> Result<&str, ExtractError> {
    raw.map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ExtractError::InvalidInput("channel_url is required".into()))
}

pub(crate) fn clamp_num_videos(raw: i64) -> usize {
    usize::try_from(raw.clamp(MIN_NUM_VIDEOS, MAX_NUM_VIDEOS)).unwrap_or(1)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
