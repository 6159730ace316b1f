use super::*;
use crate::test_support::clip;

#[test]
fn identical_values_form_one_candidate() {
    let clips = [clip("1", "a", 0.0, 1.0), clip("2", "b", 0.0, 1.0), clip("3", "a", 1.0, 2.0)];
    let out = group(clips.iter().map(|c| ("yuv420p", c)));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].clip_ids, ["1", "2", "3"]);
    assert_eq!(out[0].source_ids, ["a", "b"]);
}

#[test]
fn ranking_prefers_clips_then_sources_then_first_seen() {
    let clips = [
        clip("1", "a", 0.0, 1.0),
        clip("2", "b", 0.0, 1.0),
        clip("3", "c", 0.0, 1.0),
        clip("4", "c", 1.0, 2.0),
        clip("5", "d", 0.0, 1.0),
        clip("6", "e", 0.0, 1.0),
    ];
    let values = ["x", "y", "z", "z", "w", "y"];
    let out = group(values.into_iter().zip(clips.iter()));
    let order: Vec<&str> = out.iter().map(|c| c.value).collect();
    assert_eq!(order, ["y", "z", "x", "w"]);
}

#[test]
fn null_is_its_own_group() {
    let clips = [clip("1", "a", 0.0, 1.0), clip("2", "b", 0.0, 1.0)];
    let values = [None, Some("bt709")];
    let out = group(values.into_iter().zip(clips.iter()));
    assert_eq!(out.len(), 2);
    assert!(offers(&out, &None));
    assert!(offers(&out, &Some("bt709")));
    assert!(!offers(&out, &Some("bt2020")));
}
