use super::*;

#[test]
fn empty_document_gives_defaults() {
    let opts = EditorOpts::from_json_str("{}").unwrap();
    assert_eq!(opts.store.key_prefix, "video-sort/project/");
    assert_eq!(opts.timeline.seek_tolerance_s, 0.2);
    assert_eq!(opts.timeline.fast_forward_rate, 2.0);
    assert_eq!(opts.trim.nudge_step_s, 1.0 / 60.0);
    assert_eq!(opts.http.root, "http://localhost:8000");
    assert_eq!(opts.output_prefix, "video-sort-");
}

#[test]
fn partial_sections_override_only_named_fields() {
    let opts = EditorOpts::from_json_str(
        r#"{"timeline": {"seek_tolerance_s": 0.05}, "http": {"root": "http://nas:9000"}, "output_prefix": "reel-"}"#,
    )
    .unwrap();
    assert_eq!(opts.timeline.seek_tolerance_s, 0.05);
    assert_eq!(opts.timeline.fast_forward_rate, 2.0);
    assert_eq!(opts.http.root, "http://nas:9000");
    assert_eq!(opts.http.connect_timeout_s, 5);
    assert_eq!(opts.output_prefix, "reel-");
}

#[test]
fn malformed_document_is_a_serde_error() {
    assert!(matches!(
        EditorOpts::from_json_str("{\"trim\": 3}"),
        Err(ClipError::Serde(_))
    ));
}
