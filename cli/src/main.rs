use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_DISPOSITION;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "extractor-cli", about = "YouTube comment extractor API CLI")]
struct Cli {
    #[arg(long, env = "EXTRACTOR_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server answers `/healthz`.
    Ping,
    /// Scrape a channel's latest uploads and print the analytics.
    Extract {
        channel_url: String,
        #[arg(long, default_value_t = 3)]
        num_videos: u32,
        /// Ask the server to rescrape videos it has already recorded.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Save the combined CSV for a channel.
    Download {
        channel_url: String,
        #[arg(long, default_value_t = 3)]
        num_videos: u32,
        /// Output path; defaults to the name the server suggests.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the most-liked comments already extracted for a channel.
    Comments {
        channel_url: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Forget every scraped video and delete the server's CSV files.
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();

    match cli.command {
        Command::Ping => run_ping(&client, &base_url).await,
        Command::Extract { channel_url, num_videos, force } => {
            let force = force.to_string();
            let num_videos = num_videos.to_string();
            let query = [
                ("channel_url", channel_url.as_str()),
                ("num_videos", num_videos.as_str()),
                ("force", force.as_str()),
            ];
            let request = client.get(endpoint(&base_url, "/api/extract_channel")).query(&query);
            print_json(&send_json(request).await?)
        }
        Command::Download { channel_url, num_videos, output } => {
            run_download(&client, &base_url, &channel_url, num_videos, output).await
        }
        Command::Comments { channel_url, limit } => {
            let limit = limit.to_string();
            let query = [("channel_url", channel_url.as_str()), ("limit", limit.as_str())];
            let request = client.get(endpoint(&base_url, "/api/comments")).query(&query);
            print_json(&send_json(request).await?)
        }
        Command::Clear => {
            let request = client.post(endpoint(&base_url, "/api/clear_scraped_data"));
            print_json(&send_json(request).await?)
        }
    }
}

async fn run_ping(client: &reqwest::Client, base_url: &str) -> Result<(), CliError> {
    let response = client.get(endpoint(base_url, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_download(
    client: &reqwest::Client,
    base_url: &str,
    channel_url: &str,
    num_videos: u32,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let num_videos = num_videos.to_string();
    let query = [("channel_url", channel_url), ("num_videos", num_videos.as_str()), ("download", "true")];
    let response = client.get(endpoint(base_url, "/api/extract_channel")).query(&query).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&body) });
    }

    let suggested = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(attachment_filename)
        .unwrap_or("comments.csv")
        .to_owned();
    let path = output.unwrap_or_else(|| PathBuf::from(suggested));
    let bytes = response.bytes().await?;
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| CliError::Write { path: path.clone(), source })?;
    println!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, CliError> {
    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&value) });
    }
    Ok(value)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// The `message` of an error body, or the whole body when it has none.
fn error_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map_or_else(|| body.to_string(), ToOwned::to_owned)
}

/// Filename from `attachment; filename="x.csv"`.
fn attachment_filename(header: &str) -> Option<&str> {
    let (_, rest) = header.split_once("filename=")?;
    let name = rest.split(';').next()?.trim().trim_matches('"');
    (!name.is_empty() && !name.contains(['/', '\\'])).then_some(name)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
