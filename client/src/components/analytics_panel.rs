//! Compact metric cards for the latest extraction.

#[cfg(test)]
#[path = "analytics_panel_test.rs"]
mod analytics_panel_test;

use leptos::prelude::*;

use crate::net::types::ChannelAnalytics;

/// Label/value pairs shown as metric cards.
pub fn analytics_items(analytics: &ChannelAnalytics) -> Vec<(&'static str, String)> {
    vec![
        ("Videos Examined", analytics.total_videos.max(analytics.num_scraped_videos).to_string()),
        ("Videos With Comments", analytics.num_scraped_videos.to_string()),
        ("Total Comments", analytics.total_comments.to_string()),
        ("Avg. Comments/Video", analytics.average().to_string()),
    ]
}

#[component]
pub fn AnalyticsPanel(analytics: ChannelAnalytics) -> impl IntoView {
    let items = analytics_items(&analytics);

    view! {
        <section class="metrics">
            {items
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="metric">
                            <span class="metric__value">{value}</span>
                            <span class="metric__label">{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </section>
    }
}
