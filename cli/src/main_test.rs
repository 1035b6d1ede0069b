use clap::CommandFactory;
use serde_json::json;

use super::*;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn extract_defaults_to_three_videos() {
    let cli = Cli::try_parse_from(["extractor-cli", "extract", "https://youtube.com/@x"]).unwrap();
    match cli.command {
        Command::Extract { channel_url, num_videos, force } => {
            assert_eq!(channel_url, "https://youtube.com/@x");
            assert_eq!(num_videos, 3);
            assert!(!force);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("http://127.0.0.1:8000/", "/healthz"), "http://127.0.0.1:8000/healthz");
    assert_eq!(endpoint("http://h", "/api/comments"), "http://h/api/comments");
}

#[test]
fn error_message_prefers_message_field() {
    assert_eq!(
        error_message(&json!({"status": "error", "message": "No videos found in channel"})),
        "No videos found in channel"
    );
    assert_eq!(error_message(&Value::Null), "null");
}

#[test]
fn attachment_filename_reads_quoted_name() {
    assert_eq!(
        attachment_filename("attachment; filename=\"youtube_comments_x_all_videos.csv\""),
        Some("youtube_comments_x_all_videos.csv")
    );
    assert_eq!(attachment_filename("attachment; filename=plain.csv; size=3"), Some("plain.csv"));
}

#[test]
fn attachment_filename_rejects_paths_and_missing_names() {
    assert_eq!(attachment_filename("attachment; filename=\"../etc/passwd\""), None);
    assert_eq!(attachment_filename("attachment"), None);
    assert_eq!(attachment_filename("attachment; filename=\"\""), None);
}
