use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    driver::MAX_TARGET_FPS,
    error::{ConfigError, Result},
    filters::FilterId,
    noise::NoiseConfig,
};

/// Session configuration, usually read from a TOML file
///
/// ```toml
/// [driver]
/// filter = "vhs"
/// target_fps = 24.0
///
/// [noise.tear]
/// enabled = true
/// frequency = 0.2
/// magnitude = 0.8
/// duration_frames = 10
/// size = 0.5
/// ```
///
/// Missing tables and keys fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub driver: DriverConfig,
    pub noise: NoiseConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config = toml::from_str(&text).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        debug!("Read config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = toml::to_string_pretty(self).map_err(|e| invalid("config", e))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<()> {
        self.driver.validate()?;
        self.noise.validate()
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Filter name; an unknown name means frames pass through unfiltered
    pub filter: String,

    pub target_fps: f64,

    /// Wider source frames are scaled down to this width
    pub max_width: u32,

    /// Fixed seed for every random draw; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            filter: FilterId::Retro.as_str().to_string(),
            target_fps: 24.0,
            max_width: 640,
            seed: None,
        }
    }
}

impl DriverConfig {
    /// The selected filter, if the name is known
    pub fn filter_id(&self) -> Option<FilterId> {
        FilterId::from_name(&self.filter)
    }

    fn validate(&self) -> Result<()> {
        if !(self.target_fps > 0.0 && self.target_fps <= MAX_TARGET_FPS) {
            return Err(invalid("driver.target_fps", self.target_fps).into());
        }
        if self.max_width == 0 {
            return Err(invalid("driver.max_width", self.max_width).into());
        }
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
