//! Presentation metadata for the filter and noise pickers.
//!
//! Nothing in the pixel pipeline reads these tables; they exist for whatever UI lists the
//! available looks.

use crate::{filters::FilterId, noise::NoiseId};

/// Catalog entry for a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub id: FilterId,
    pub label: &'static str,
    pub description: &'static str,
}

/// Catalog entry for a noise category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSpec {
    pub id: NoiseId,
    pub label: &'static str,
    pub description: &'static str,
}

pub const FILTERS: [FilterSpec; 5] = [
    FilterSpec {
        id: FilterId::Retro,
        label: "Retro (sepia / vignette / grain)",
        description: "Sepia tone, darkened corners and film grain",
    },
    FilterSpec {
        id: FilterId::Horror,
        label: "Horror (desaturated / green cast / hard contrast)",
        description: "Cold, sickly grade for a creepy mood",
    },
    FilterSpec {
        id: FilterId::Serious,
        label: "Serious (noir)",
        description: "Low saturation, strong contrast and a light vignette",
    },
    FilterSpec {
        id: FilterId::Vhs,
        label: "VHS / glitch (chroma shift / scanlines)",
        description: "Misregistered color channels over scanlines",
    },
    FilterSpec {
        id: FilterId::Comic,
        label: "Comic (posterize / outlines)",
        description: "Stepped color with Sobel edge outlines",
    },
];

pub const NOISES: [NoiseSpec; 5] = [
    NoiseSpec {
        id: NoiseId::Dropout,
        label: "Dropout (thin line loss)",
        description: "Flickering thin horizontal lines",
    },
    NoiseSpec {
        id: NoiseId::Block,
        label: "Block loss / offset",
        description: "Rectangles broken up or copied out of place",
    },
    NoiseSpec {
        id: NoiseId::Tear,
        label: "Tear (band shift)",
        description: "A band slipping sideways like a timebase error",
    },
    NoiseSpec {
        id: NoiseId::Snow,
        label: "Snow (static)",
        description: "Bursts of local black-and-white static",
    },
    NoiseSpec {
        id: NoiseId::HeadSwitch,
        label: "Head switching (bottom)",
        description: "Colored streaks and jitter along the bottom edge",
    },
];

/// Find a filter entry by machine name
pub fn filter_spec(name: &str) -> Option<&'static FilterSpec> {
    FILTERS.iter().find(|spec| spec.id.as_str() == name)
}

/// Find a noise entry by machine name
pub fn noise_spec(name: &str) -> Option<&'static NoiseSpec> {
    NOISES.iter().find(|spec| spec.id.as_str() == name)
}

/// Machine names of every filter, in catalog order
pub fn filter_names() -> Vec<&'static str> {
    FILTERS.iter().map(|spec| spec.id.as_str()).collect()
}

/// Machine names of every noise category, in catalog order
pub fn noise_names() -> Vec<&'static str> {
    NOISES.iter().map(|spec| spec.id.as_str()).collect()
}
