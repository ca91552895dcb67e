use medigate::domain::UploadedFile;

fn named(name: &str) -> UploadedFile {
    UploadedFile::new(name, "application/json", b"[]".to_vec())
}

#[test]
fn given_plain_name_when_sanitizing_then_name_is_unchanged() {
    assert_eq!(named("ecg_001.json").safe_name(), "ecg_001.json");
}

#[test]
fn given_traversal_name_when_sanitizing_then_only_final_component_remains() {
    assert_eq!(named("../../etc/passwd").safe_name(), "passwd");
    assert_eq!(named("C:\\scans\\brain.png").safe_name(), "brain.png");
}

#[test]
fn given_unusable_name_when_sanitizing_then_falls_back() {
    assert_eq!(named("").safe_name(), "upload");
    assert_eq!(named("..").safe_name(), "upload");
    assert_eq!(named("/").safe_name(), "upload");
}

#[test]
fn given_bytes_when_created_then_size_matches() {
    assert_eq!(named("a.json").size(), 2);
}
