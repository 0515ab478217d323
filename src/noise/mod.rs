//! # Tape-Damage Noise
//!
//! Localized, short-lived corruption layered on top of the filtered frame. Five independent
//! categories, always applied in this order:
//!
//! - **dropout**: thin horizontal lines flickering white, black, or smeared from a neighbour row
//! - **block**: a rectangle showing live content from a displaced source rectangle
//! - **tear**: a horizontal band bent sideways along a half sine
//! - **snow**: a patch of black-and-white static
//! - **headswitch**: a colored, jittery band along the bottom edge
//!
//! [`NoiseEngine`] keeps damage alive across frames; [`apply_noise`] is the stateless
//! single-frame variant driven by one strength value.

mod damage;
pub mod engine;
pub mod oneshot;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub use engine::NoiseEngine;
pub use oneshot::apply_noise;

/// Longest lifetime the controls allow, in frames
pub const MAX_DURATION_FRAMES: u32 = 30;

/// Closed set of noise categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseId {
    Dropout,
    Block,
    Tear,
    Snow,
    HeadSwitch,
}

impl NoiseId {
    /// All categories in application order
    pub const ALL: [NoiseId; 5] = [
        NoiseId::Dropout,
        NoiseId::Block,
        NoiseId::Tear,
        NoiseId::Snow,
        NoiseId::HeadSwitch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoiseId::Dropout => "dropout",
            NoiseId::Block => "block",
            NoiseId::Tear => "tear",
            NoiseId::Snow => "snow",
            NoiseId::HeadSwitch => "headswitch",
        }
    }

    /// Look a category up by its machine name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl fmt::Display for NoiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category noise settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Whether new events of this category may start
    pub enabled: bool,

    /// Chance per frame (0.0-1.0) that an idle category starts an event
    pub frequency: f32,

    /// Severity (0.0-1.0): displacement distance, jitter amplitude
    pub magnitude: f32,

    /// Lifetime of an event in frames (at least 1)
    pub duration_frames: u32,

    /// Geometric extent (0.0-1.0): band height, block or patch dimensions
    pub size: f32,
}

impl NoiseParams {
    pub const fn new(enabled: bool, frequency: f32, magnitude: f32, duration_frames: u32, size: f32) -> Self {
        Self {
            enabled,
            frequency,
            magnitude,
            duration_frames,
            size,
        }
    }

    /// Copy with every field forced into its valid range
    pub fn sanitized(&self) -> Self {
        Self {
            enabled: self.enabled,
            frequency: unit(self.frequency),
            magnitude: unit(self.magnitude),
            duration_frames: self.duration_frames.max(1),
            size: unit(self.size),
        }
    }

    fn validate(&self, id: NoiseId) -> Result<()> {
        for (field, value) in [
            ("frequency", self.frequency),
            ("magnitude", self.magnitude),
            ("size", self.size),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: format!("noise.{}.{}", id, field),
                    value: value.to_string(),
                }
                .into());
            }
        }

        if !(1..=MAX_DURATION_FRAMES).contains(&self.duration_frames) {
            return Err(ConfigError::InvalidValue {
                key: format!("noise.{}.duration_frames", id),
                value: self.duration_frames.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Clamp into [0, 1], mapping NaN to 0
fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Settings for every noise category
///
/// One field per category, so a config can never be missing an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub dropout: NoiseParams,
    pub block: NoiseParams,
    pub tear: NoiseParams,
    pub snow: NoiseParams,
    pub headswitch: NoiseParams,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            dropout: NoiseParams::new(true, 0.08, 0.5, 6, 0.3),
            block: NoiseParams::new(true, 0.05, 0.5, 8, 0.4),
            tear: NoiseParams::new(true, 0.06, 0.5, 10, 0.4),
            snow: NoiseParams::new(false, 0.04, 0.5, 5, 0.3),
            headswitch: NoiseParams::new(true, 0.1, 0.5, 12, 0.3),
        }
    }
}

impl NoiseConfig {
    /// Every category disabled
    pub fn disabled() -> Self {
        let mut config = Self::default();
        for id in NoiseId::ALL {
            config.get_mut(id).enabled = false;
        }
        config
    }

    pub fn get(&self, id: NoiseId) -> &NoiseParams {
        match id {
            NoiseId::Dropout => &self.dropout,
            NoiseId::Block => &self.block,
            NoiseId::Tear => &self.tear,
            NoiseId::Snow => &self.snow,
            NoiseId::HeadSwitch => &self.headswitch,
        }
    }

    pub fn get_mut(&mut self, id: NoiseId) -> &mut NoiseParams {
        match id {
            NoiseId::Dropout => &mut self.dropout,
            NoiseId::Block => &mut self.block,
            NoiseId::Tear => &mut self.tear,
            NoiseId::Snow => &mut self.snow,
            NoiseId::HeadSwitch => &mut self.headswitch,
        }
    }

    /// Builder-style replacement of one category's settings
    pub fn with(mut self, id: NoiseId, params: NoiseParams) -> Self {
        *self.get_mut(id) = params;
        self
    }

    /// Copy with every category sanitized
    pub fn sanitized(&self) -> Self {
        Self {
            dropout: self.dropout.sanitized(),
            block: self.block.sanitized(),
            tear: self.tear.sanitized(),
            snow: self.snow.sanitized(),
            headswitch: self.headswitch.sanitized(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for id in NoiseId::ALL {
            self.get(id).validate(id)?;
        }
        Ok(())
    }
}
