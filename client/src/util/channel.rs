//! Channel URL and download naming helpers.
//!
//! DESIGN
//! ======
//! The channel identifier rule lives here so the browser (download names,
//! results table) and the server (analytics, CSV names) derive the same id
//! from the same URL.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

/// Channel identifier used in analytics and CSV names: the handle after the
/// last `@`, up to the next `/`. URLs without a handle fall back to the last
/// non-empty path segment.
pub fn channel_id_from_url(channel_url: &str) -> String {
    let url = channel_url.trim();
    if let Some((_, handle)) = url.rsplit_once('@') {
        let id = handle.split(['/', '?', '#']).next().unwrap_or_default();
        if !id.is_empty() {
            return id.to_owned();
        }
    }

    url.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "videos")
        .next_back()
        .unwrap_or("channel")
        .to_owned()
}

/// Mean comments per video, rounded half up. Zero videos count as one.
pub fn average_comments(total_comments: usize, videos: usize) -> usize {
    let videos = videos.max(1);
    (2 * total_comments + videos) / (2 * videos)
}

/// Filesystem-safe stamp from an ISO-8601 instant: `2024-05-01T12:30:45.123Z`
/// becomes `2024-05-01-12-30-45`.
pub fn download_timestamp(iso: &str) -> String {
    iso.chars()
        .take(19)
        .map(|c| if c == ':' || c == 'T' { '-' } else { c })
        .collect()
}

/// Suggested name for the browser's saved CSV.
pub fn download_filename(channel_url: &str, timestamp: &str) -> String {
    format!("youtube_comments_{}_{timestamp}.csv", channel_id_from_url(channel_url))
}

/// Current instant as an ISO-8601 string from the browser clock.
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        "1970-01-01T00:00:00.000Z".to_owned()
    }
}
