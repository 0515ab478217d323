//! # Filter Pipeline
//!
//! Five deterministic whole-frame looks, each applied in place to a [`PixelBuffer`].
//!
//! - **retro**: sepia, film grain, vignette, scanlines
//! - **horror**: desaturated green cast, hard contrast, shadow noise
//! - **serious**: noir grade with gamma darkening and a soft vignette
//! - **vhs**: scanlines, a glitch row, horizontal chroma shift
//! - **comic**: posterized color with black Sobel outlines
//!
//! ## Usage
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use retro_camfx::{filters::{apply_filter, FilterId}, PixelBuffer};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut frame = PixelBuffer::new_filled(64, 48, [120, 90, 60, 255]);
//! apply_filter(&mut frame, FilterId::Retro, &mut rng);
//! ```

pub mod pixel;
pub mod traits;

mod comic;
mod horror;
mod retro;
mod serious;
mod vhs;

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::frame::PixelBuffer;

pub use comic::ComicFilter;
pub use horror::HorrorFilter;
pub use retro::RetroFilter;
pub use serious::SeriousFilter;
pub use traits::Filter;
pub use vhs::VhsFilter;

/// Closed set of available filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    Retro,
    Horror,
    Serious,
    Vhs,
    Comic,
}

impl FilterId {
    pub const ALL: [FilterId; 5] = [
        FilterId::Retro,
        FilterId::Horror,
        FilterId::Serious,
        FilterId::Vhs,
        FilterId::Comic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterId::Retro => "retro",
            FilterId::Horror => "horror",
            FilterId::Serious => "serious",
            FilterId::Vhs => "vhs",
            FilterId::Comic => "comic",
        }
    }

    /// Look a filter up by its machine name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }

    /// The filter implementation behind this identifier
    pub fn filter(self) -> &'static dyn Filter {
        match self {
            FilterId::Retro => &RetroFilter,
            FilterId::Horror => &HorrorFilter,
            FilterId::Serious => &SeriousFilter,
            FilterId::Vhs => &VhsFilter,
            FilterId::Comic => &ComicFilter,
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply the selected filter to the frame in place
pub fn apply_filter(frame: &mut PixelBuffer, id: FilterId, rng: &mut dyn RngCore) {
    id.filter().apply(frame, rng);
}

/// Apply a filter selected by name; unknown names leave the frame untouched
pub fn apply_named(frame: &mut PixelBuffer, name: &str, rng: &mut dyn RngCore) {
    if let Some(id) = FilterId::from_name(name) {
        apply_filter(frame, id, rng);
    }
}
