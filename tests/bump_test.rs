// Version rewriting over realistic workspace layouts
use std::fs;

use semver::Version;

use bump_and_release::bump::rewrite_version_files;

#[test]
fn test_monorepo_glob_hits_nested_manifests() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("projects/core")).unwrap();
    fs::create_dir_all(dir.path().join("projects/widgets")).unwrap();
    fs::write(
        dir.path().join("package.json"),
        "{\n  \"name\": \"root\",\n  \"version\": \"2.3.0\"\n}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("projects/core/package.json"),
        r#"{"name": "core", "version": "2.3.0"}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("projects/widgets/package.json"),
        r#"{"name": "widgets", "version": "2.3.0"}"#,
    )
    .unwrap();

    let changed = rewrite_version_files(
        dir.path(),
        &[
            "package.json".to_string(),
            "projects/*/package.json".to_string(),
        ],
        &Version::new(2, 4, 0),
    )
    .unwrap();

    assert_eq!(changed.len(), 3);
    for name in [
        "package.json",
        "projects/core/package.json",
        "projects/widgets/package.json",
    ] {
        let contents = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(contents.contains("\"version\": \"2.4.0\""), "{}", name);
        assert!(!contents.contains("2.3.0"), "{}", name);
    }
}

#[test]
fn test_only_version_field_is_touched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(
        &path,
        concat!(
            "{\n",
            "  \"name\": \"pkg\",\n",
            "  \"version\": \"1.0.0\",\n",
            "  \"dependencies\": {\"dep\": \"^1.0.0\"}\n",
            "}\n"
        ),
    )
    .unwrap();

    rewrite_version_files(
        dir.path(),
        &["package.json".to_string()],
        &Version::new(1, 0, 1),
    )
    .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"version\": \"1.0.1\""));
    // Dependency ranges are not version fields and stay untouched
    assert!(contents.contains("\"dep\": \"^1.0.0\""));
}

#[test]
fn test_invalid_glob_pattern_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = rewrite_version_files(
        dir.path(),
        &["[".to_string()],
        &Version::new(1, 0, 0),
    );
    assert!(result.is_err());
}
