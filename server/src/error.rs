//! Extraction error type and its HTTP rendering.
//!
//! ERROR HANDLING
//! ==============
//! Every failure surfaces to the browser as `{"status":"error","message":…}`
//! so the front end can show the message verbatim in a notification.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Stable error codes for logs and machine-readable responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Errors produced by extraction, CSV, and history operations.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The request was missing or had an unusable parameter.
    #[error("{0}")]
    InvalidInput(String),

    /// The channel listing came back without any usable video entries.
    #[error("No videos found in channel")]
    NoVideos,

    /// A download was requested but there is nothing on disk to send.
    #[error("CSV file not found")]
    CsvNotFound,

    /// `yt-dlp` could not be started.
    #[error("failed to run {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// `yt-dlp` exited with a failure status.
    #[error("yt-dlp failed: {stderr}")]
    Tool { stderr: String },

    /// `yt-dlp` produced output that is not the expected JSON document.
    #[error("unexpected yt-dlp output: {0}")]
    ToolOutput(String),

    /// `yt-dlp` ran past the configured timeout.
    #[error("yt-dlp timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for ExtractError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::NoVideos => "E_NO_VIDEOS",
            Self::CsvNotFound => "E_CSV_NOT_FOUND",
            Self::Spawn { .. } => "E_SPAWN",
            Self::Tool { .. } => "E_TOOL",
            Self::ToolOutput(_) => "E_TOOL_OUTPUT",
            Self::Timeout { .. } => "E_TIMEOUT",
            Self::Io(_) => "E_IO",
            Self::Csv(_) => "E_CSV",
            Self::Json(_) => "E_JSON",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Tool { .. } | Self::ToolOutput(_) | Self::Timeout { .. })
    }
}

impl From<QueryRejection> for ExtractError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl ExtractError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::CsvNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body sent for every failed API call.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = ErrorBody { status: "error", code: self.error_code(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
