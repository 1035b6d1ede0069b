use super::*;

#[test]
fn results_row_copies_counts_and_rounds_average() {
    let row = results_row(&ChannelAnalytics::new("RustConf", 3, 2, 7));
    assert_eq!(
        row,
        ResultsRow { channel: "RustConf".to_owned(), videos: 2, comments: 7, average: 4 }
    );
}

#[test]
fn results_row_labels_unknown_channel() {
    let row = results_row(&ChannelAnalytics::new("  ", 0, 0, 0));
    assert_eq!(row.channel, "Current Channel");
    assert_eq!(row.average, 0);
}

#[test]
fn csv_contents_mentions_preserved_characters() {
    assert!(CSV_CONTENTS.iter().any(|item| item.contains("special characters preserved")));
}

#[test]
fn download_note_warns_csv_can_exceed_counts() {
    assert!(DOWNLOAD_SCOPE_NOTE.contains("every video extracted so far"));
    assert!(DOWNLOAD_SCOPE_NOTE.contains("more than the counts above"));
}
