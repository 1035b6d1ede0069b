//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds a typed `ServerConfig`.
//! Every knob has a default so a bare `cargo run` serves on port 8000 with
//! `./data` as the working directory for CSV output and scrape history.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 2000;
pub const DEFAULT_MAX_COMMENT_CHARS: usize = 2000;
pub const DEFAULT_YTDLP_TIMEOUT_SECS: u64 = 600;

/// Which origins the CORS layer admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(String),
}

/// Retry and output knobs for a channel extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractTuning {
    /// Attempts per video before it is skipped.
    pub max_attempts: u32,
    /// First back-off delay; doubles on every further attempt.
    pub backoff_base: Duration,
    /// Comment text longer than this is truncated before it is written.
    pub max_comment_chars: usize,
}

impl ExtractTuning {
    /// Delay slept after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1 << shift)
    }
}

impl Default for ExtractTuning {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            max_comment_chars: DEFAULT_MAX_COMMENT_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub ytdlp_bin: String,
    pub ytdlp_timeout: Duration,
    pub cors_origin: CorsOrigin,
    pub tuning: ExtractTuning,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 8000
    /// - `DATA_DIR`: default `data`
    /// - `YTDLP_BIN`: default `yt-dlp` (resolved through `PATH`)
    /// - `YTDLP_TIMEOUT_SECS`: default 600
    /// - `CORS_ALLOW_ORIGIN`: `*` (default) or a single origin
    /// - `EXTRACT_MAX_ATTEMPTS`: default 3
    /// - `EXTRACT_BACKOFF_BASE_MS`: default 2000
    /// - `EXTRACT_MAX_COMMENT_CHARS`: default 2000
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var("DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let ytdlp_bin = std::env::var("YTDLP_BIN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_YTDLP_BIN.to_owned());

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            data_dir,
            ytdlp_bin,
            ytdlp_timeout: Duration::from_secs(env_parse("YTDLP_TIMEOUT_SECS", DEFAULT_YTDLP_TIMEOUT_SECS)),
            cors_origin: parse_cors_origin(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref()),
            tuning: ExtractTuning {
                max_attempts: env_parse("EXTRACT_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS).max(1),
                backoff_base: Duration::from_millis(env_parse("EXTRACT_BACKOFF_BASE_MS", DEFAULT_BACKOFF_BASE_MS)),
                max_comment_chars: env_parse("EXTRACT_MAX_COMMENT_CHARS", DEFAULT_MAX_COMMENT_CHARS),
            },
        }
    }

    /// Directory holding per-video and combined CSV files.
    #[must_use]
    pub fn extracted_dir(&self) -> PathBuf {
        self.data_dir.join("extracted")
    }

    /// JSON file recording which videos were already scraped.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("scraped_videos.json")
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_cors_origin(raw: Option<&str>) -> CorsOrigin {
    match raw.map(str::trim) {
        None | Some("" | "*") => CorsOrigin::Any,
        Some(origin) => CorsOrigin::Exact(origin.trim_end_matches('/').to_owned()),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
