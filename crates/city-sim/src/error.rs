use std::path::PathBuf;

use city_core::CityError;
use city_director::DirectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CityError),

    #[error("director error: {0}")]
    Director(#[from] DirectorError),

    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    ConfigToml(#[from] toml::de::Error),

    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
