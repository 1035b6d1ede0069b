use super::*;

#[test]
fn parse_playlist_builds_watch_urls() {
    let raw = br#"{
        "id": "UC123",
        "entries": [
            {"id": "aaa", "title": "First upload", "upload_date": "20240101"},
            {"id": "bbb", "title": null},
            {"id": "", "title": "broken"},
            {"title": "no id"},
            null
        ]
    }"#;

    let videos = parse_playlist(raw).unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id, "aaa");
    assert_eq!(videos[0].url, "https://youtube.com/watch?v=aaa");
    assert_eq!(videos[0].title, "First upload");
    assert_eq!(videos[0].upload_date.as_deref(), Some("20240101"));
    assert_eq!(videos[1].title, "Untitled");
    assert!(videos[1].upload_date.is_none());
}

#[test]
fn parse_playlist_without_entries_is_tool_output_error() {
    let err = parse_playlist(br#"{"id":"UC123"}"#).unwrap_err();
    assert!(matches!(err, ExtractError::ToolOutput(_)));
}

#[test]
fn parse_playlist_rejects_non_json() {
    let err = parse_playlist(b"ERROR: not json").unwrap_err();
    assert!(matches!(err, ExtractError::ToolOutput(_)));
}

#[test]
fn parse_comments_reads_fields_and_defaults_nulls() {
    let raw = br#"{
        "id": "aaa",
        "comments": [
            {"id": "c1", "text": "great talk", "author": "@alice", "like_count": 12, "timestamp": 1700000000},
            {"id": "c2", "text": null, "author": "@bob", "like_count": null},
            null
        ]
    }"#;

    let comments = parse_comments(raw).unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].likes, 12);
    assert_eq!(comments[0].timestamp, Some(1_700_000_000));
    assert_eq!(comments[1].text, "");
    assert_eq!(comments[1].likes, 0);
    assert!(comments[1].timestamp.is_none());
}

#[test]
fn parse_comments_without_array_is_empty() {
    assert!(parse_comments(br#"{"id":"aaa"}"#).unwrap().is_empty());
}

#[tokio::test]
async fn missing_binary_reports_spawn_error() {
    let source = YtDlp::new("definitely-not-a-real-yt-dlp-binary", Duration::from_secs(5));
    let err = source.fetch_comments("https://youtube.com/watch?v=aaa").await.unwrap_err();
    assert!(matches!(err, ExtractError::Spawn { .. }));
    assert_eq!(crate::error::ErrorCode::error_code(&err), "E_SPAWN");
}
