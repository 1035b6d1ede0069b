use super::*;

#[test]
fn analytics_items_lists_counts_in_order() {
    let items = analytics_items(&ChannelAnalytics::new("x", 3, 2, 7));
    let labels: Vec<&str> = items.iter().map(|(label, _)| *label).collect();
    assert_eq!(
        labels,
        vec!["Videos Examined", "Videos With Comments", "Total Comments", "Avg. Comments/Video"]
    );
    assert_eq!(items[0].1, "3");
    assert_eq!(items[1].1, "2");
    assert_eq!(items[2].1, "7");
    assert_eq!(items[3].1, "4");
}

#[test]
fn analytics_items_never_show_fewer_examined_than_scraped() {
    // Analytics cached before `total_videos` existed decode it as zero.
    let analytics = ChannelAnalytics { total_videos: 0, ..ChannelAnalytics::new("x", 0, 5, 10) };
    assert_eq!(analytics_items(&analytics)[0].1, "5");
}
