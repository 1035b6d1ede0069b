//! Confirmation modal guarding the scrape-history reset.

use leptos::prelude::*;

pub const CONFIRM_TITLE: &str = "Clear Scraped Data";
pub const CONFIRM_QUESTION: &str = "Are you sure you want to clear all scraped data?";
pub const CONFIRM_WARNING: &str = "This will reset your extraction history and cannot be undone.";

/// Modal dialog confirming a clear. Both actions are disabled while `busy`.
#[component]
pub fn ConfirmClearDialog(busy: Signal<bool>, on_confirm: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    view! {
        <div
            class="dialog-backdrop"
            on:click=move |_| {
                if !busy.get_untracked() {
                    on_cancel.run(());
                }
            }
        >
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{CONFIRM_TITLE}</h2>
                <p>{CONFIRM_QUESTION}</p>
                <p class="dialog__danger">{CONFIRM_WARNING}</p>
                <div class="dialog__actions">
                    <button class="btn" disabled=move || busy.get() on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--danger"
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() { "Clearing..." } else { "Clear Data" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
