//! # Retro-CamFX
//!
//! Turn live camera frames into retro-looking footage: five stylized color filters plus a
//! tape-damage engine whose glitches persist across consecutive frames.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rand::{rngs::SmallRng, SeedableRng};
//! use retro_camfx::{apply_filter, FilterId, NoiseConfig, NoiseEngine, PixelBuffer};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut engine = NoiseEngine::new(&NoiseConfig::default());
//!
//! for _ in 0..24 {
//!     let mut frame = PixelBuffer::new_filled(640, 480, [90, 120, 160, 255]);
//!     apply_filter(&mut frame, FilterId::Vhs, &mut rng);
//!     engine.step(&mut frame);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`frame`] - RGBA pixel buffer shared by every stage
//! - [`filters`] - The five stylized color filters
//! - [`noise`] - Tape damage, both the per-session engine and the one-shot form
//! - [`driver`] - Reference capture, process, present loop
//! - [`catalog`] - Display names for filter and noise pickers
//! - [`config`] - Configuration management
//!
//! ## Filters at runtime
//!
//! The filter set is closed: every [`FilterId`] is backed by exactly one
//! [`Filter`](filters::Filter) implementation. Pick one by id when the choice is made at
//! runtime. `VhsFilter` and `ComicFilter` can also run against an explicit snapshot of the
//! untouched capture:
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use retro_camfx::{filters::{Filter, VhsFilter}, FilterId, PixelBuffer};
//!
//! let mut rng = SmallRng::seed_from_u64(3);
//! let mut frame = PixelBuffer::new_filled(32, 24, [200, 80, 40, 255]);
//! let capture = frame.snapshot();
//!
//! let comic: &dyn Filter = FilterId::Comic.filter();
//! assert_eq!(comic.name(), "comic");
//! comic.apply(&mut frame, &mut rng);
//!
//! // chroma shift reads the capture, not the comic output
//! VhsFilter.apply_with_snapshot(&mut frame, &capture, &mut rng);
//! ```

pub mod catalog;
pub mod config;
pub mod driver;
pub mod error;
pub mod filters;
pub mod frame;
pub mod noise;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{CamFxError, Result},
    filters::{apply_filter, FilterId},
    frame::{PixelBuffer, Snapshot},
    noise::{apply_noise, NoiseConfig, NoiseEngine, NoiseId, NoiseParams},
};
