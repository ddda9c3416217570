use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LogSettings {
    pub log_path: String,
    pub log_level: String,
    pub log_file_name: String,
    pub log_overwrite: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_path: "output".to_string(),
            log_level: "warn".to_string(),
            log_file_name: "convoy.log".to_string(),
            log_overwrite: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("failed to prepare log file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid logger configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),

    #[error("a logger is already installed: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

pub fn setup_logging(log_level: &str, log_file_path: &Path) -> Result<Config, LoggerError> {
    let log_level = get_logging_level(log_level);
    let log_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y.%m.%d %H:%M:%S)} | {({l}):5.5} | {({f}:{L}):>40.40} | {m}{n}",
        )))
        .build(log_file_path)
        .map_err(|source| LoggerError::Io {
            path: log_file_path.to_path_buf(),
            source,
        })?;

    Ok(Config::builder()
        .appender(Appender::builder().build("x", Box::new(log_file)))
        .build(Root::builder().appender("x").build(log_level))?)
}

pub fn get_logging_level(log_level: &str) -> LevelFilter {
    match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

/// Picks the file the log is written to. An existing log is either removed or left alone, in
/// which case the new log gets a timestamp suffix.
pub fn log_file_path(log_path: &Path, log_settings: &LogSettings) -> Result<PathBuf, LoggerError> {
    let io_error = |source| LoggerError::Io {
        path: log_path.to_path_buf(),
        source,
    };
    if !log_path.exists() {
        fs::create_dir_all(log_path).map_err(io_error)?;
    }

    let log_file_path = log_path.join(&log_settings.log_file_name);
    if !log_file_path.exists() {
        return Ok(log_file_path);
    }
    if log_settings.log_overwrite {
        fs::remove_file(&log_file_path).map_err(io_error)?;
        return Ok(log_file_path);
    }

    let suffix = Utc::now().format("_%d%m%Y_%H%M%S").to_string();
    let stem = log_settings
        .log_file_name
        .split('.')
        .next()
        .unwrap_or(log_settings.log_file_name.as_str());
    Ok(log_path.join(format!("{}{}.log", stem, suffix)))
}

pub fn initiate_logger(config_path: &Path, log_settings: &LogSettings) -> Result<PathBuf, LoggerError> {
    let log_path = config_path.join(&log_settings.log_path).join("logs");
    let log_file_path = log_file_path(&log_path, log_settings)?;
    let logger_config = setup_logging(&log_settings.log_level, &log_file_path)?;
    log4rs::init_config(logger_config)?;
    Ok(log_file_path)
}
