//! Toast stack and the helper pages use to raise toasts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Toasts live in the `RwSignal<NotificationState>` context. In the browser
//! each toast dismisses itself after [`AUTO_DISMISS_MS`]; the close button
//! removes it sooner.

use leptos::prelude::*;

use crate::state::notifications::{NotificationKind, NotificationState};

pub const AUTO_DISMISS_MS: u64 = 5_000;

/// Queue a toast and schedule its dismissal.
pub fn notify(
    notifications: RwSignal<NotificationState>,
    kind: NotificationKind,
    title: &str,
    description: impl Into<String>,
) {
    let description = description.into();
    let Some(id) = notifications.try_update(|n| n.push(kind, title, description)) else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(AUTO_DISMISS_MS)).await;
        notifications.try_update(|n| n.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

#[component]
pub fn NotificationStack() -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationState>>();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            {move || {
                notifications
                    .get()
                    .items
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.css_class()>
                                <div class="toast__body">
                                    <strong class="toast__title">{toast.title}</strong>
                                    <span class="toast__description">{toast.description}</span>
                                </div>
                                <button
                                    class="toast__close"
                                    aria-label="Dismiss"
                                    on:click=move |_| notifications.update(|n| n.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
