//! Preview table of the most-liked extracted comments.

#[cfg(test)]
#[path = "comments_table_test.rs"]
mod comments_table_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::net::types::CommentRow;

pub const EMPTY_MESSAGE: &str = "No comments available.";

/// Characters of comment text shown before eliding.
pub const PREVIEW_CHARS: usize = 280;

pub fn preview_text(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_owned();
    }
    let mut clipped: String = text.chars().take(PREVIEW_CHARS).collect();
    clipped.push('…');
    clipped
}

#[component]
pub fn CommentsTable(comments: Vec<CommentRow>) -> impl IntoView {
    if comments.is_empty() {
        return view! { <p class="comments__empty">{EMPTY_MESSAGE}</p> }.into_any();
    }

    view! {
        <section class="card comments">
            <h2 class="card__title">"Top Comments"</h2>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Author"</th>
                        <th>"Comment"</th>
                        <th>"Likes"</th>
                    </tr>
                </thead>
                <tbody>
                    {comments
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    <td class="table__strong">{row.author}</td>
                                    <td>
                                        <span class="comments__text">{preview_text(&row.text)}</span>
                                        <span class="comments__video">{row.video_title}</span>
                                    </td>
                                    <td>{row.likes}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    }
    .into_any()
}
