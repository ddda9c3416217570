use log::LevelFilter;
use tempfile::TempDir;

use convoy_output::logger::{get_logging_level, log_file_path, setup_logging, LogSettings};

#[test]
fn test_logging_levels() {
    assert_eq!(get_logging_level("debug"), LevelFilter::Debug);
    assert_eq!(get_logging_level("INFO"), LevelFilter::Info);
    assert_eq!(get_logging_level("off"), LevelFilter::Off);
    assert_eq!(get_logging_level("verbose"), LevelFilter::Warn);
}

#[test]
fn test_stock_log_settings() {
    let settings = LogSettings::default();
    assert_eq!(settings.log_level, "warn");
    assert!(settings.log_overwrite);
}

#[test]
fn test_existing_log_is_kept_when_not_overwriting() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    let settings = LogSettings {
        log_overwrite: false,
        ..LogSettings::default()
    };

    let first = log_file_path(&log_path, &settings).unwrap();
    assert_eq!(first, log_path.join("convoy.log"));
    std::fs::write(&first, "previous run").unwrap();

    let second = log_file_path(&log_path, &settings).unwrap();
    assert_ne!(second, first);
    assert!(second
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("convoy_") && name.ends_with(".log")));
    assert!(first.exists());
}

#[test]
fn test_existing_log_is_removed_when_overwriting() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    let settings = LogSettings::default();
    let first = log_file_path(&log_path, &settings).unwrap();
    std::fs::write(&first, "previous run").unwrap();

    let second = log_file_path(&log_path, &settings).unwrap();
    assert_eq!(second, first);
    assert!(!second.exists());
    assert!(setup_logging(&settings.log_level, &second).is_ok());
}
