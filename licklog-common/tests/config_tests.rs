//! Configuration loading and root folder resolution
//!
//! Tests that touch LICKLOG_ROOT_FOLDER are marked #[serial] so they never
//! race on the process environment.

use licklog_common::config::{
    default_root_folder, prepare_root_folder, resolve_root_folder, ConfigSource, TomlConfig,
    DATABASE_FILE, DEFAULT_PORT, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let resolved = resolve_root_folder(None, &TomlConfig::default());
    assert_eq!(resolved, default_root_folder());
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/licklog-env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/licklog-toml")),
        ..TomlConfig::default()
    };

    let resolved = resolve_root_folder(None, &config);
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/tmp/licklog-env"));
}

#[test]
#[serial]
fn test_toml_used_when_env_missing() {
    env::remove_var(ROOT_FOLDER_ENV);
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/licklog-toml")),
        ..TomlConfig::default()
    };

    assert_eq!(
        resolve_root_folder(None, &config),
        PathBuf::from("/tmp/licklog-toml")
    );
}

#[test]
#[serial]
fn test_cli_beats_env() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/licklog-env");
    let resolved = resolve_root_folder(Some(Path::new("/tmp/licklog-cli")), &TomlConfig::default());
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/tmp/licklog-cli"));
}

#[test]
fn test_load_from_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 7001\n[logging]\nlevel = \"warn\"\n").unwrap();

    let (config, source) = TomlConfig::load(Some(&path));
    assert_eq!(config.port, 7001);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(source, ConfigSource::File(path));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let (config, source) = TomlConfig::load(Some(&path));
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(matches!(source, ConfigSource::Rejected { path: p, .. } if p == path));
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"\n[logging]\nlevel = \"trace\"\n").unwrap();

    let (config, source) = TomlConfig::load(Some(&path));
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.logging.level, "info");
    match source {
        ConfigSource::Rejected { path: rejected, reason } => {
            assert_eq!(rejected, path);
            assert!(!reason.is_empty());
        }
        other => panic!("expected a rejected config file, got {other:?}"),
    }
}

#[test]
fn test_prepare_root_folder_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("licklog");

    let db_path = prepare_root_folder(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(db_path, root.join(DATABASE_FILE));
}
