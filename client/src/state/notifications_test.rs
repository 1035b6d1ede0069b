use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NotificationState::default();
    let a = state.push(NotificationKind::Success, "Extraction Complete", "Data extracted successfully");
    let b = state.push(NotificationKind::Error, "Extraction Error", "boom");
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].title, "Extraction Error");
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = NotificationState::default();
    let a = state.push(NotificationKind::Warning, "Input Required", "Please enter a YouTube channel URL");
    let b = state.push(NotificationKind::Success, "Data Cleared", "All scraped data has been reset");
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, b);

    state.dismiss(999);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn push_drops_oldest_beyond_limit() {
    let mut state = NotificationState::default();
    for i in 0..(MAX_VISIBLE + 2) {
        state.push(NotificationKind::Success, format!("t{i}"), "");
    }
    assert_eq!(state.items.len(), MAX_VISIBLE);
    assert_eq!(state.items[0].title, "t2");
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = NotificationState::default();
    let a = state.push(NotificationKind::Success, "a", "");
    state.dismiss(a);
    let b = state.push(NotificationKind::Success, "b", "");
    assert_ne!(a, b);
}

#[test]
fn kind_css_classes() {
    assert_eq!(NotificationKind::Success.css_class(), "toast toast--success");
    assert_eq!(NotificationKind::Warning.css_class(), "toast toast--warning");
    assert_eq!(NotificationKind::Error.css_class(), "toast toast--error");
}
