use super::*;
use crate::test_support::{catalog, clip, probe, source};

#[test]
fn lookup_and_probe_access() {
    let cat = catalog(vec![
        source("a", probe(1920, 1080, 10.0)),
        SourceVideo::new("b", "trip"),
    ]);
    assert_eq!(cat.len(), 2);
    assert_eq!(cat.probe("a").unwrap().duration, 10.0);
    assert!(cat.get("b").is_some());
    assert!(cat.probe("b").is_none());
    assert!(cat.get("zzz").is_none());
}

#[test]
fn replace_all_fills_in_missing_probe() {
    let mut cat = catalog(vec![SourceVideo::new("a", "trip")]);
    assert!(cat.needs_probe("trip"));

    cat.replace_all(vec![source("a", probe(640, 480, 3.0))]);
    assert!(!cat.needs_probe("trip"));
    assert_eq!(cat.get("a").unwrap().duration(), Some(3.0));
}

#[test]
fn for_tag_orders_by_mtime_and_filters() {
    let cat = catalog(vec![
        SourceVideo::new("late", "trip").with_mtime(30),
        SourceVideo::new("other", "cats").with_mtime(1),
        SourceVideo::new("early", "trip").with_mtime(10),
    ]);
    let ids: Vec<&str> = cat.for_tag("trip").iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["early", "late"]);
}

#[test]
fn unprobed_in_lists_each_gap_once() {
    let cat = catalog(vec![
        source("a", probe(1920, 1080, 10.0)),
        SourceVideo::new("b", "trip"),
    ]);
    let clips = vec![
        clip("1", "b", 0.0, 1.0),
        clip("2", "a", 0.0, 1.0),
        clip("3", "b", 1.0, 2.0),
        clip("4", "gone", 0.0, 1.0),
    ];
    assert_eq!(cat.unprobed_in(&clips), ["b", "gone"]);
    assert!(SourceCatalog::is_used("a", &clips));
    assert!(!SourceCatalog::is_used("c", &clips));
}
