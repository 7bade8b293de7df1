use super::Config;
use crate::error::SpliceError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_from_empty_text() {
    let config = Config::parse("").unwrap();

    assert_eq!(config.open_markers, 2);
    assert_eq!(config.close_markers, 1);
    assert!(!config.backup);
    assert_eq!(config.backup_suffix, ".orig");
}

#[test]
fn test_partial_overrides() {
    let config = Config::parse("open_markers = 1\nbackup = true\n").unwrap();

    assert_eq!(config.open_markers, 1);
    assert_eq!(config.close_markers, 1);
    assert!(config.backup);
}

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linesplice.toml");
    fs::write(&path, "backup_suffix = \".bak\"\nclose_markers = 2\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.backup_suffix, ".bak");
    assert_eq!(config.close_markers, 2);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, SpliceError::Config { .. }));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linesplice.toml");
    fs::write(&path, "open_markers = \"two\"\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, SpliceError::Config { .. }));
}
