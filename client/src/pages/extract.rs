//! Extraction page: channel form, actions, status line, and results.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only route. It restores remembered input after hydration,
//! runs extractions against the server, starts CSV downloads, and resets the
//! scrape history behind a confirmation dialog.
//!
//! DESIGN
//! ======
//! Submit and download decisions are pure functions (`plan_extract`,
//! `plan_download`) over the form and extraction state, so the rules for
//! when a request goes out are tested without a browser.

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;

use leptos::prelude::*;

use crate::components::analytics_panel::AnalyticsPanel;
use crate::components::comments_table::CommentsTable;
use crate::components::confirm_clear_dialog::ConfirmClearDialog;
use crate::components::notifications::{NotificationStack, notify};
use crate::components::results_table::ResultsTable;
use crate::net::api;
use crate::state::extraction::{self, ExtractionState};
use crate::state::form::{self, FormState};
use crate::state::notifications::{NotificationKind, NotificationState};
use crate::util::channel::{download_filename, download_timestamp, now_iso};

/// What pressing "Extract" should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractPlan {
    /// A request is already running.
    Ignore,
    /// Show an input warning instead of calling the server.
    Warn(&'static str),
    Request { channel_url: String, num_videos: u32 },
}

pub fn plan_extract(form: &FormState, state: &ExtractionState) -> ExtractPlan {
    if state.loading {
        return ExtractPlan::Ignore;
    }
    match form.validate() {
        Ok(url) => ExtractPlan::Request { channel_url: url.to_owned(), num_videos: form.num_videos },
        Err(message) => ExtractPlan::Warn(message),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadPlan {
    pub href: String,
    pub filename: String,
}

/// The download to start, if the current state allows one. `iso_now` names
/// the saved file.
pub fn plan_download(form: &FormState, state: &ExtractionState, iso_now: &str) -> Option<DownloadPlan> {
    if !state.can_download(form) {
        return None;
    }
    let url = form.trimmed_url();
    Some(DownloadPlan {
        href: api::download_url(url, form.num_videos),
        filename: download_filename(url, &download_timestamp(iso_now)),
    })
}

#[component]
pub fn ExtractPage() -> impl IntoView {
    let form = expect_context::<RwSignal<FormState>>();
    let extraction = expect_context::<RwSignal<ExtractionState>>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    // Effects only run in the browser, after hydration.
    let restored = RwSignal::new(false);
    Effect::new(move || {
        if restored.get_untracked() {
            return;
        }
        form.set(FormState::load());
        extraction.update(|s| s.restore_cached(extraction::load_cached_analytics()));
        restored.set(true);
    });
    Effect::new(move || {
        let current = form.get();
        if restored.get() {
            current.save();
        }
    });
    Effect::new(move || {
        let analytics = extraction.with(|s| s.analytics.clone());
        if restored.get() {
            extraction::save_cached_analytics(analytics.as_ref());
        }
    });

    let on_extract = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (channel_url, num_videos) =
            match plan_extract(&form.get_untracked(), &extraction.get_untracked()) {
                ExtractPlan::Ignore => return,
                ExtractPlan::Warn(message) => {
                    notify(notifications, NotificationKind::Warning, form::INPUT_REQUIRED_TITLE, message);
                    return;
                }
                ExtractPlan::Request { channel_url, num_videos } => (channel_url, num_videos),
            };
        extraction.update(ExtractionState::begin_extract);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match api::extract_channel(&channel_url, num_videos).await {
                Ok(analytics) => {
                    extraction.update(|s| s.finish_extract(analytics, &channel_url));
                    notify(
                        notifications,
                        NotificationKind::Success,
                        "Extraction Complete",
                        "Data extracted successfully",
                    );
                    match api::fetch_comments(&channel_url, api::COMMENT_PREVIEW_LIMIT).await {
                        Ok(rows) => extraction.update(|s| s.set_comments(rows)),
                        Err(e) => log::warn!("comment preview failed: {e}"),
                    }
                }
                Err(e) => {
                    log::warn!("extraction failed: {e}");
                    extraction.update(ExtractionState::fail_extract);
                    notify(notifications, NotificationKind::Error, "Extraction Error", e);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (channel_url, num_videos);
    };

    let on_download = move |_| {
        let Some(plan) = plan_download(&form.get_untracked(), &extraction.get_untracked(), &now_iso()) else {
            return;
        };
        extraction.update(ExtractionState::begin_download);
        match api::trigger_download(&plan.href, &plan.filename) {
            Ok(()) => extraction.update(ExtractionState::finish_download),
            Err(e) => {
                extraction.update(ExtractionState::fail_download);
                notify(notifications, NotificationKind::Error, "Download Error", e);
            }
        }
    };

    let on_clear_open = move |_| extraction.update(ExtractionState::open_confirm_clear);
    let on_clear_cancel = Callback::new(move |()| extraction.update(ExtractionState::cancel_confirm_clear));
    let on_clear_confirm = Callback::new(move |()| {
        if extraction.get_untracked().clearing {
            return;
        }
        extraction.update(ExtractionState::begin_clear);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match api::clear_scraped_data().await {
                Ok(body) => {
                    extraction.update(ExtractionState::finish_clear);
                    notify(notifications, NotificationKind::Success, "Data Cleared", body.message);
                }
                Err(e) => {
                    extraction.update(ExtractionState::fail_clear);
                    notify(notifications, NotificationKind::Error, "Clear Error", e);
                }
            }
        });
    });

    let loading = move || extraction.with(|s| s.loading);
    let downloading = move || extraction.with(|s| s.downloading);
    let clearing = Signal::derive(move || extraction.with(|s| s.clearing));
    let extract_disabled = move || !extraction.with(|s| form.with(|f| s.can_extract(f)));
    let download_disabled = move || !extraction.with(|s| form.with(|f| s.can_download(f)));
    let clear_disabled = move || !extraction.with(ExtractionState::can_clear);

    view! {
        <main class="extract-page">
            <header class="extract-page__header">
                <h1>"YouTube Comment Extractor"</h1>
                <p class="extract-page__subtitle">
                    "Pull comments from a channel's latest uploads and export them as CSV."
                </p>
            </header>

            <form class="card extract-form" on:submit=on_extract>
                <label class="extract-form__label">
                    "YouTube Channel URL"
                    <input
                        class="extract-form__input"
                        type="url"
                        placeholder="https://www.youtube.com/@channel"
                        prop:value=move || form.with(|f| f.channel_url.clone())
                        on:input=move |ev| form.update(|f| f.channel_url = event_target_value(&ev))
                        prop:disabled=loading
                    />
                </label>
                <label class="extract-form__label">
                    "Number of Videos"
                    <input
                        class="extract-form__input extract-form__input--narrow"
                        type="number"
                        min=form::MIN_NUM_VIDEOS.to_string()
                        max=form::MAX_NUM_VIDEOS.to_string()
                        prop:value=move || form.with(|f| f.num_videos.to_string())
                        on:change=move |ev| form.update(|f| f.set_num_videos_input(&event_target_value(&ev)))
                        prop:disabled=loading
                    />
                </label>
                <div class="extract-form__actions">
                    <button class="btn btn--primary" type="submit" disabled=extract_disabled>
                        {move || if loading() { "Extracting..." } else { "Extract Comments" }}
                    </button>
                    <Show when=move || extraction.with(|s| s.analytics.is_some())>
                        <button class="btn" type="button" disabled=download_disabled on:click=on_download>
                            {move || if downloading() { "Preparing..." } else { "Download CSV" }}
                        </button>
                    </Show>
                    <button class="btn btn--danger" type="button" disabled=clear_disabled on:click=on_clear_open>
                        "Clear Data"
                    </button>
                </div>
            </form>

            {move || {
                extraction
                    .with(|s| s.status_tone().map(|tone| (tone, s.status.clone())))
                    .map(|(tone, status)| view! { <p class=tone.css_class()>{status}</p> })
            }}

            {move || {
                extraction
                    .with(|s| s.analytics.clone())
                    .map(|analytics| {
                        view! {
                            <AnalyticsPanel analytics=analytics.clone()/>
                            <ResultsTable analytics=analytics/>
                        }
                    })
            }}

            <Show when=move || extraction.with(|s| s.analytics.is_some() && !s.loading)>
                {move || view! { <CommentsTable comments=extraction.with(|s| s.comments.clone())/> }}
            </Show>

            <Show when=move || extraction.with(|s| s.confirm_clear_open)>
                <ConfirmClearDialog busy=clearing on_confirm=on_clear_confirm on_cancel=on_clear_cancel/>
            </Show>

            <NotificationStack/>
        </main>
    }
}
