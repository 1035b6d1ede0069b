//! YouTube URL helpers.

pub use client::util::channel::channel_id_from_url;

/// Point a channel URL at its "Videos" tab so the listing is uploads only.
#[must_use]
pub fn videos_tab_url(channel_url: &str) -> String {
    let url = channel_url.trim();
    if url.ends_with("/videos") {
        return url.to_owned();
    }
    format!("{}/videos", url.trim_end_matches('/'))
}

/// The `v=` query value of a watch URL.
#[must_use]
pub fn video_id_from_url(video_url: &str) -> Option<&str> {
    let (_, rest) = video_url.rsplit_once("v=")?;
    let id = rest.split('&').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

#[must_use]
pub fn watch_url(video_id: &str) -> String {
    format!("https://youtube.com/watch?v={video_id}")
}

#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;
