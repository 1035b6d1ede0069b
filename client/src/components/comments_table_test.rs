use super::*;

#[test]
fn preview_text_keeps_short_comments() {
    assert_eq!(preview_text("great talk \"really\""), "great talk \"really\"");
}

#[test]
fn preview_text_clips_long_comments_on_char_boundary() {
    let long = "é".repeat(PREVIEW_CHARS + 10);
    let preview = preview_text(&long);
    assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
    assert!(preview.ends_with('…'));
}

#[test]
fn empty_message_text() {
    assert_eq!(EMPTY_MESSAGE, "No comments available.");
}
