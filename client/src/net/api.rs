//! REST API helpers for communicating with the extraction server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` and anchor-driven
//! downloads via `web-sys`. Server-side (SSR): stubs returning an error since
//! these calls are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, String>` carrying a message fit for a toast:
//! the server's own `message` when it sent one, otherwise a generic fallback
//! with the HTTP status.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ChannelAnalytics, ClearResponse, CommentRow};
#[cfg(any(test, feature = "hydrate"))]
use super::types::ApiErrorBody;

/// Comments shown in the preview table after an extraction.
pub const COMMENT_PREVIEW_LIMIT: usize = 50;

fn query_string(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(any(test, feature = "hydrate"))]
fn extract_endpoint(channel_url: &str, num_videos: u32) -> String {
    let num_videos = num_videos.to_string();
    format!(
        "/api/extract_channel?{}",
        query_string(&[("channel_url", channel_url), ("num_videos", &num_videos), ("force", "true")])
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn comments_endpoint(channel_url: &str, limit: usize) -> String {
    let limit = limit.to_string();
    format!("/api/comments?{}", query_string(&[("channel_url", channel_url), ("limit", &limit)]))
}

/// URL that streams the combined CSV for a channel.
pub fn download_url(channel_url: &str, num_videos: u32) -> String {
    let num_videos = num_videos.to_string();
    format!(
        "/api/extract_channel?{}",
        query_string(&[("channel_url", channel_url), ("num_videos", &num_videos), ("download", "true")])
    )
}

/// Pick the message a failed response should surface.
#[cfg(any(test, feature = "hydrate"))]
fn failure_message(body: Option<ApiErrorBody>, status: u16, fallback: &str) -> String {
    body.and_then(|b| b.message)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("{fallback} (status {status})"))
}

#[cfg(feature = "hydrate")]
async fn error_from_response(resp: gloo_net::http::Response, fallback: &str) -> String {
    let status = resp.status();
    let body = resp.json::<ApiErrorBody>().await.ok();
    failure_message(body, status, fallback)
}

/// Run an extraction via `GET /api/extract_channel` and return its analytics.
///
/// # Errors
///
/// Returns the server's error message, or a transport error string.
pub async fn extract_channel(channel_url: &str, num_videos: u32) -> Result<ChannelAnalytics, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&extract_endpoint(channel_url, num_videos))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp, "Failed to extract comments").await);
        }
        let body: super::types::ExtractResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.analytics)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (channel_url, num_videos);
        Err("not available on server".to_owned())
    }
}

/// Fetch the most-liked extracted comments via `GET /api/comments`.
///
/// # Errors
///
/// Returns the server's error message, or a transport error string.
pub async fn fetch_comments(channel_url: &str, limit: usize) -> Result<Vec<CommentRow>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&comments_endpoint(channel_url, limit))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp, "Failed to load comments").await);
        }
        resp.json::<Vec<CommentRow>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (channel_url, limit);
        Err("not available on server".to_owned())
    }
}

/// Reset the server's scrape history via `POST /api/clear_scraped_data`.
///
/// # Errors
///
/// Returns the server's error message, or a transport error string.
pub async fn clear_scraped_data() -> Result<ClearResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/clear_scraped_data")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp, "Failed to clear data").await);
        }
        resp.json::<ClearResponse>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Ask the browser to save `href` as `filename` through a temporary anchor.
///
/// # Errors
///
/// Returns an error string if the document or anchor cannot be created.
pub fn trigger_download(href: &str, filename: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "document unavailable".to_owned())?;
        let body = document.body().ok_or_else(|| "document body unavailable".to_owned())?;
        let anchor = document
            .create_element("a")
            .map_err(|_| "failed to create download link".to_owned())?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "failed to create download link".to_owned())?;
        anchor.set_href(href);
        anchor.set_download(filename);
        let _ = anchor.style().set_property("display", "none");
        body.append_child(&anchor)
            .map_err(|_| "failed to attach download link".to_owned())?;
        anchor.click();
        anchor.remove();
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (href, filename);
        Err("not available on server".to_owned())
    }
}
