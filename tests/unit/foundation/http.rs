use super::*;

#[test]
fn url_joins_without_double_slashes() {
    let opts = HttpOpts {
        root: "http://media.local:8000/".to_string(),
        ..HttpOpts::default()
    };
    assert_eq!(opts.url("/cook"), "http://media.local:8000/cook");
    assert_eq!(HttpOpts::default().url("list"), "http://localhost:8000/list");
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: HttpOpts = serde_json::from_str(r#"{"read_timeout_s": 30}"#).unwrap();
    assert_eq!(opts.root, "http://localhost:8000");
    assert_eq!(opts.connect_timeout_s, 5);
    assert_eq!(opts.read_timeout_s, Some(30));
}
