use std::path::PathBuf;

use thiserror::Error;

use convoy_models::dist::DistError;
use convoy_models::error::{AddressError, ConfigError, PlanError, ServiceError};
use convoy_output::logger::LoggerError;
use convoy_output::writer::OutputError;

/// Anything that stops a scenario from being assembled. All of these are fatal: the scenario is
/// built in one pass before the event loop starts, so there is nothing to retry.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("invalid speed distribution: {0}")]
    Distribution(#[from] DistError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Logger(#[from] LoggerError),
}
