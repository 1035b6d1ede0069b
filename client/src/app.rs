//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::extract::ExtractPage;
use crate::state::{extraction::ExtractionState, form::FormState, notifications::NotificationState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the form, extraction, and notification contexts. Stored values
/// are restored by the page after hydration so server and browser render
/// the same initial markup.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let form = RwSignal::new(FormState::default());
    let extraction = RwSignal::new(ExtractionState::default());
    let notifications = RwSignal::new(NotificationState::default());

    provide_context(form);
    provide_context(extraction);
    provide_context(notifications);

    view! {
        <Stylesheet id="leptos" href="/pkg/comment-extractor.css"/>
        <Title text="YouTube Comment Extractor"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=ExtractPage/>
            </Routes>
        </Router>
    }
}
