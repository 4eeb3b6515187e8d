// tests/config_test.rs
use auto_semver::config::{load_conventions, Conventions, ProtectStrategy, LOCAL_CONFIG_FILE};
use auto_semver::AutoSemverError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_prefix = "ver-"
release_prefix = "deployed-"
remote = "upstream"

[branches]
patch = ["fix/"]
minor = ["feat/", "feature/"]

[protection]
strategy = "force-move"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let conventions = load_conventions(Some(temp_file.path())).unwrap();
    assert_eq!(conventions.tag_prefix, "ver-");
    assert_eq!(conventions.protection_tag("prod"), "deployed-prod");
    assert_eq!(conventions.remote, "upstream");
    assert_eq!(conventions.branches.patch, vec!["fix/".to_string()]);
    assert_eq!(conventions.protection.strategy, ProtectStrategy::ForceMove);
    // Untouched keys keep their defaults
    assert_eq!(conventions.merge_marker, "Merge branch");
    assert_eq!(conventions.remote_port_marker, ":7999");
}

#[test]
fn test_invalid_file_is_configuration_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"tag_prefix = [1, 2]\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_conventions(Some(temp_file.path())).unwrap_err();
    assert!(matches!(err, AutoSemverError::Configuration(_)));
}

#[test]
fn test_missing_explicit_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let err = load_conventions(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
    assert!(matches!(err, AutoSemverError::Configuration(_)));
}

#[test]
fn test_invalid_initial_version_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"initial_version = \"1.0.0-beta\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    assert!(load_conventions(Some(temp_file.path())).is_err());
}

#[test]
#[serial]
fn test_discovers_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(LOCAL_CONFIG_FILE), "release_prefix = \"env-\"\n").unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_conventions(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().release_prefix, "env-");
}

#[test]
#[serial]
fn test_defaults_without_local_file() {
    let dir = TempDir::new().unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_conventions(None);
    env::set_current_dir(original_dir).unwrap();

    // A user-level file may exist on a developer machine; it still has to parse
    let conventions = result.unwrap();
    if dirs::config_dir()
        .map(|dir| !dir.join(".autosemver.toml").exists())
        .unwrap_or(true)
    {
        assert_eq!(conventions, Conventions::default());
    }
}
