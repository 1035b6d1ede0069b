use super::*;

// =============================================================
// channel_id_from_url
// =============================================================

#[test]
fn channel_id_takes_handle_after_at() {
    assert_eq!(channel_id_from_url("https://www.youtube.com/@RustConf"), "RustConf");
    assert_eq!(channel_id_from_url("https://www.youtube.com/@RustConf/videos"), "RustConf");
    assert_eq!(channel_id_from_url("  https://youtube.com/@a_b?si=xyz "), "a_b");
}

#[test]
fn channel_id_without_handle_uses_last_segment() {
    assert_eq!(
        channel_id_from_url("https://www.youtube.com/channel/UC123abc/videos"),
        "UC123abc"
    );
    assert_eq!(channel_id_from_url("https://www.youtube.com/c/Foo/"), "Foo");
}

#[test]
fn channel_id_falls_back_to_placeholder() {
    assert_eq!(channel_id_from_url(""), "channel");
}

// =============================================================
// average_comments
// =============================================================

#[test]
fn average_rounds_half_up() {
    assert_eq!(average_comments(7, 2), 4);
    assert_eq!(average_comments(5, 3), 2);
    assert_eq!(average_comments(10, 4), 3);
}

#[test]
fn average_with_no_videos_divides_by_one() {
    assert_eq!(average_comments(0, 0), 0);
    assert_eq!(average_comments(9, 0), 9);
}

// =============================================================
// download naming
// =============================================================

#[test]
fn download_timestamp_replaces_separators() {
    assert_eq!(download_timestamp("2024-05-01T12:30:45.123Z"), "2024-05-01-12-30-45");
}

#[test]
fn download_timestamp_keeps_short_input() {
    assert_eq!(download_timestamp("2024-05-01"), "2024-05-01");
}

#[test]
fn download_filename_uses_channel_handle() {
    assert_eq!(
        download_filename("https://youtube.com/@RustConf", "2024-05-01-12-30-45"),
        "youtube_comments_RustConf_2024-05-01-12-30-45.csv"
    );
}

#[test]
fn now_iso_off_wasm_is_epoch() {
    assert_eq!(download_timestamp(&now_iso()), "1970-01-01-00-00-00");
}
