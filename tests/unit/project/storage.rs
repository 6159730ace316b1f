use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "clipline_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn escape_key_is_filesystem_safe() {
    assert_eq!(escape_key("video-sort/project/trip"), "video-sort%2Fproject%2Ftrip");
    assert_eq!(escape_key("a b.c"), "a%20b%2Ec");
    assert_eq!(escape_key("plain_Key-1"), "plain_Key-1");
}

#[test]
fn memory_storage_roundtrip_and_remove() {
    let mut s = MemoryStorage::new();
    assert_eq!(s.read("k").unwrap(), None);
    s.write("k", "v1").unwrap();
    s.write("k", "v2").unwrap();
    assert_eq!(s.read("k").unwrap().as_deref(), Some("v2"));
    s.remove("k").unwrap();
    s.remove("k").unwrap();
    assert_eq!(s.read("k").unwrap(), None);
}

#[test]
fn failing_memory_storage_reports_storage_errors() {
    let mut s = MemoryStorage::failing();
    assert!(matches!(s.read("k"), Err(ClipError::Storage(_))));
    assert!(matches!(s.write("k", "v"), Err(ClipError::Storage(_))));
    assert!(matches!(s.remove("k"), Err(ClipError::Storage(_))));
}

#[test]
fn fs_storage_creates_directory_on_first_write() {
    let root = temp_dir("fs_storage");
    let mut s = FsStorage::new(&root);
    assert_eq!(s.read("video-sort/project/x").unwrap(), None);

    s.write("video-sort/project/x", "{\"clips\":[]}").unwrap();
    assert!(s.path_for("video-sort/project/x").exists());
    assert_eq!(
        s.read("video-sort/project/x").unwrap().as_deref(),
        Some("{\"clips\":[]}")
    );

    s.remove("video-sort/project/x").unwrap();
    s.remove("video-sort/project/x").unwrap();
    assert_eq!(s.read("video-sort/project/x").unwrap(), None);

    std::fs::remove_dir_all(&root).ok();
}
