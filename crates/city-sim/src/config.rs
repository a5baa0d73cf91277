//! TOML configuration loading.
//!
//! ```toml
//! tick_interval_ms     = 100
//! director_interval_ms = 5000
//! seed                 = 7
//!
//! [world]
//! grid_size = 40
//! car_count = 30
//! ```
//!
//! Missing keys take their [`SimConfig::default`] values.

use std::path::Path;

use city_core::SimConfig;

use crate::{SimError, SimResult};

/// Read, parse, and validate a config file.
pub fn load_config(path: impl AsRef<Path>) -> SimResult<SimConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> SimResult<SimConfig> {
    let config: SimConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
