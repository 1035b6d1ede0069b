//! Extraction form input and its remembered values.
//!
//! The channel URL and video count survive reloads through `localStorage`
//! under [`CHANNEL_URL_KEY`] and [`NUM_VIDEOS_KEY`].

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::util::storage;

pub const CHANNEL_URL_KEY: &str = "last-channel-url";
pub const NUM_VIDEOS_KEY: &str = "last-num-videos";

pub const DEFAULT_NUM_VIDEOS: u32 = 3;
pub const MIN_NUM_VIDEOS: u32 = 1;
pub const MAX_NUM_VIDEOS: u32 = 50;

pub const INPUT_REQUIRED_TITLE: &str = "Input Required";
pub const INPUT_REQUIRED_MESSAGE: &str = "Please enter a YouTube channel URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub channel_url: String,
    pub num_videos: u32,
}

impl Default for FormState {
    fn default() -> Self {
        Self { channel_url: String::new(), num_videos: DEFAULT_NUM_VIDEOS }
    }
}

impl FormState {
    /// Restore the last submitted values from `localStorage`.
    pub fn load() -> Self {
        Self::from_stored(storage::load_string(CHANNEL_URL_KEY), storage::load_string(NUM_VIDEOS_KEY).as_deref())
    }

    pub fn from_stored(channel_url: Option<String>, num_videos: Option<&str>) -> Self {
        Self {
            channel_url: channel_url.unwrap_or_default(),
            num_videos: num_videos.map_or(DEFAULT_NUM_VIDEOS, parse_num_videos),
        }
    }

    pub fn save(&self) {
        storage::save_string(CHANNEL_URL_KEY, &self.channel_url);
        storage::save_string(NUM_VIDEOS_KEY, &self.num_videos.to_string());
    }

    pub fn trimmed_url(&self) -> &str {
        self.channel_url.trim()
    }

    /// Apply the raw value of the number input.
    pub fn set_num_videos_input(&mut self, raw: &str) {
        self.num_videos = parse_num_videos(raw);
    }

    /// The channel URL to submit, or the warning to show instead.
    ///
    /// # Errors
    ///
    /// Returns [`INPUT_REQUIRED_MESSAGE`] when the URL is blank.
    pub fn validate(&self) -> Result<&str, &'static str> {
        let url = self.trimmed_url();
        if url.is_empty() { Err(INPUT_REQUIRED_MESSAGE) } else { Ok(url) }
    }
}

/// Parse a video count from user input or storage. Blank, zero, and
/// unparsable input fall back to the default; anything else is clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_num_videos(raw: &str) -> u32 {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return DEFAULT_NUM_VIDEOS;
    };
    if !value.is_finite() || value.abs() < 1.0 {
        return DEFAULT_NUM_VIDEOS;
    }
    value.trunc().clamp(f64::from(MIN_NUM_VIDEOS), f64::from(MAX_NUM_VIDEOS)) as u32
}
