use super::*;

fn raw(id: &str, text: &str, likes: i64) -> RawComment {
    RawComment { id: id.into(), text: text.into(), author: format!("@{id}"), likes, timestamp: Some(1_700_000_000) }
}

fn scraped(video_id: &str, csv_path: Option<PathBuf>, upload_date: Option<&str>) -> ScrapedVideo {
    ScrapedVideo {
        video_id: video_id.into(),
        channel_id: "chan".into(),
        video_url: format!("https://youtube.com/watch?v={video_id}"),
        title: format!("Title {video_id}"),
        upload_date: upload_date.map(str::to_owned),
        total_comments: 0,
        csv_path,
        seq: 0,
    }
}

#[test]
fn truncate_chars_counts_characters_not_bytes() {
    assert_eq!(truncate_chars("héllo", 2), "hé");
    assert_eq!(truncate_chars("short", 10), "short");
    assert_eq!(truncate_chars("", 3), "");
}

#[test]
fn to_records_truncates_text_and_formats_timestamp() {
    let comments = vec![raw("c1", "abcdef", 1), RawComment { timestamp: None, ..raw("c2", "x", 0) }];
    let records = to_records(&comments, 3);
    assert_eq!(records[0].text, "abc");
    assert_eq!(records[0].timestamp, "1700000000");
    assert_eq!(records[1].timestamp, "");
}

#[tokio::test]
async fn video_csv_quotes_commas_and_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let records = to_records(&[raw("c1", "he said \"hi\", then left", 4)], 2000);
    let path = write_video_csv(dir.path(), "vid1", &records).await.unwrap();

    assert_eq!(path, dir.path().join("vid1.csv"));
    let body = std::fs::read_to_string(&path).unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("comment_id,text,author,likes,timestamp"));
    assert_eq!(lines.next(), Some("c1,\"he said \"\"hi\"\", then left\",@c1,4,1700000000"));
}

#[tokio::test]
async fn empty_video_csv_still_has_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_video_csv(dir.path(), "vid0", &[]).await.unwrap();
    let body = std::fs::read_to_string(path).unwrap();
    assert_eq!(body.trim_end(), "comment_id,text,author,likes,timestamp");
}

#[tokio::test]
async fn combine_appends_video_columns() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_video_csv(dir.path(), "aaa", &to_records(&[raw("c1", "first", 2)], 2000)).await.unwrap();
    let b = write_video_csv(dir.path(), "bbb", &to_records(&[raw("c2", "second", 5)], 2000)).await.unwrap();
    let va = scraped("aaa", Some(a), Some("20240101"));
    let vb = scraped("bbb", Some(b), None);

    let bytes = combine("chan", &[&va, &vb]).await.unwrap();
    let body = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "comment_id,text,author,likes,timestamp,channel_id,video_url,video_title,upload_date"
    );
    assert_eq!(
        lines[1],
        "c1,first,@c1,2,1700000000,chan,https://youtube.com/watch?v=aaa,Title aaa,20240101"
    );
    assert_eq!(lines[2], "c2,second,@c2,5,1700000000,chan,https://youtube.com/watch?v=bbb,Title bbb,N/A");
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn combine_without_videos_is_csv_not_found() {
    let err = combine("chan", &[]).await.unwrap_err();
    assert!(matches!(err, ExtractError::CsvNotFound));
}

#[tokio::test]
async fn combine_with_deleted_file_is_csv_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let gone = scraped("aaa", Some(dir.path().join("missing.csv")), None);
    let err = combine("chan", &[&gone]).await.unwrap_err();
    assert!(matches!(err, ExtractError::CsvNotFound));
}

#[tokio::test]
async fn read_comments_sorts_by_likes_and_limits() {
    let dir = tempfile::tempdir().unwrap();
    let records = to_records(&[raw("c1", "meh", 1), raw("c2", "top", 9), raw("c3", "mid", 5)], 2000);
    let path = write_video_csv(dir.path(), "aaa", &records).await.unwrap();
    let video = scraped("aaa", Some(path), None);

    let rows = read_comments(&[&video], 2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].text, "top");
    assert_eq!(rows[0].likes, 9);
    assert_eq!(rows[0].video_title, "Title aaa");
    assert_eq!(rows[1].text, "mid");
}

#[test]
fn combined_names_follow_channel_id() {
    assert_eq!(combined_filename("RustConf"), "youtube_comments_RustConf_all_videos.csv");

    let now = time::macros::datetime!(2025-03-04 05:06:07 UTC);
    let path = combined_archive_path(Path::new("data/extracted"), "RustConf", now);
    assert_eq!(path, PathBuf::from("data/extracted/combined_RustConf_20250304_050607.csv"));
}
