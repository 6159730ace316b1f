use super::*;
use crate::test_support::{catalog, clip, probe, source};

#[test]
fn total_duration_sums_trims() {
    let project = Project {
        clips: vec![clip("a", "s", 2.0, 7.0), clip("b", "t", 0.0, 6.0)],
    };
    assert_eq!(project.total_duration(), 11.0);
    assert_eq!(Project::default().total_duration(), 0.0);
}

#[test]
fn record_layout_uses_persisted_field_names() {
    let mut c = clip("c1", "v.jpg", 1.0, 2.5);
    c.rotation_override = Some(Rotation::Pos90);
    let json = serde_json::to_value(Project { clips: vec![c] }).unwrap();
    let rec = &json["clips"][0];
    assert_eq!(rec["thumb"], "v.jpg");
    assert_eq!(rec["overrideRotation"], "Pos90");
    assert_eq!(rec["start"], 1.0);

    let plain = serde_json::to_value(clip("c2", "v.jpg", 0.0, 1.0)).unwrap();
    assert!(plain.get("overrideRotation").is_none());
}

#[test]
fn record_tolerates_missing_and_unknown_fields() {
    let json = r#"{"clips":[
        {"id":"x","thumb":"a","start":0,"end":3,"color":"red"},
        {"id":"y","sourceId":"b","start":1,"end":2,"rotationOverride":"Neg180"}
    ],"uninitialized":false}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert_eq!(project.clips[0].rotation_override, None);
    assert_eq!(project.clips[1].source_id, "b");
    assert_eq!(project.clips[1].rotation_override, Some(Rotation::Neg180));

    let empty: Project = serde_json::from_str("{}").unwrap();
    assert!(empty.clips.is_empty());
}

#[test]
fn validity_bounds() {
    assert!(clip("a", "s", 0.0, 10.0).is_valid_within(10.0));
    assert!(!clip("a", "s", 5.0, 5.0).is_valid_within(10.0));
    assert!(!clip("a", "s", -0.1, 5.0).is_valid_within(10.0));
    assert!(!clip("a", "s", 0.0, 10.1).is_valid_within(10.0));

    assert!(clip("a", "s", 0.0, 10.1).has_valid_range());
    assert!(!clip("a", "s", 2.0, 1.0).has_valid_range());
    assert!(!clip("a", "s", 0.0, f64::NAN).has_valid_range());
}

#[test]
fn siblings_share_source_but_exclude_self() {
    let project = Project {
        clips: vec![
            clip("a", "s", 0.0, 1.0),
            clip("b", "t", 0.0, 1.0),
            clip("c", "s", 2.0, 3.0),
        ],
    };
    let ids: Vec<&str> = project.siblings_of("a").iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c"]);
    assert!(project.siblings_of("missing").is_empty());
}

#[test]
fn effective_rotation_inherits_native() {
    let mut c = clip("a", "s", 0.0, 1.0);
    assert_eq!(c.effective_rotation(Rotation::Neg90), Rotation::Neg90);
    c.rotation_override = Some(Rotation::Unrotated);
    assert_eq!(c.effective_rotation(Rotation::Neg90), Rotation::Unrotated);
}

#[test]
fn available_clips_skip_unprobed_sources() {
    let cat = catalog(vec![
        source("s", probe(1920, 1080, 10.0)),
        crate::catalog::source::SourceVideo::new("t", "trip"),
    ]);
    let project = Project {
        clips: vec![clip("a", "s", 0.0, 1.0), clip("b", "t", 0.0, 1.0)],
    };
    let ids: Vec<&str> = project.available_clips(&cat).map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["a"]);
}
