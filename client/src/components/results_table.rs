//! Summary table for the latest extraction, plus the CSV contents legend.

#[cfg(test)]
#[path = "results_table_test.rs"]
mod results_table_test;

use leptos::prelude::*;

use crate::net::types::ChannelAnalytics;

/// What every row of the downloaded CSV carries.
pub const CSV_CONTENTS: [&str; 5] = [
    "Video ID and Title",
    "Original Channel URL",
    "Comment Text (with special characters preserved)",
    "Author Information",
    "Like Counts and Timestamps",
];

/// Download scope: every CSV recorded for the channel, not only the run above.
pub const DOWNLOAD_SCOPE_NOTE: &str = "Download CSV first extracts any newer videos, then includes every video \
     extracted so far for this channel, so it may hold more than the counts above.";

/// Display values for the single results row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsRow {
    pub channel: String,
    pub videos: usize,
    pub comments: usize,
    pub average: usize,
}

pub fn results_row(analytics: &ChannelAnalytics) -> ResultsRow {
    let channel = if analytics.channel_id.trim().is_empty() {
        "Current Channel".to_owned()
    } else {
        analytics.channel_id.clone()
    };
    ResultsRow {
        channel,
        videos: analytics.num_scraped_videos,
        comments: analytics.total_comments,
        average: analytics.average(),
    }
}

#[component]
pub fn ResultsTable(analytics: ChannelAnalytics) -> impl IntoView {
    let row = results_row(&analytics);

    view! {
        <section class="card results">
            <h2 class="card__title">"Extraction Results"</h2>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Channel"</th>
                        <th>"Videos Processed"</th>
                        <th>"Total Comments"</th>
                        <th>"Avg. Comments/Video"</th>
                    </tr>
                </thead>
                <tbody>
                    <tr>
                        <td class="table__strong">{row.channel}</td>
                        <td>{row.videos}</td>
                        <td>{row.comments}</td>
                        <td>{row.average}</td>
                    </tr>
                </tbody>
            </table>
            <div class="results__legend">
                <h3>"CSV File Contains:"</h3>
                <ul>
                    {CSV_CONTENTS.iter().map(|item| view! { <li>{*item}</li> }).collect_view()}
                </ul>
                <p class="results__note">{DOWNLOAD_SCOPE_NOTE}</p>
            </div>
        </section>
    }
}
