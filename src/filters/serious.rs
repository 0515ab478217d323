use rand::RngCore;

use crate::{
    filters::{
        pixel::{clamp_byte, contrast, desaturate, vignette},
        Filter, FilterId,
    },
    frame::{PixelBuffer, CHANNELS},
};

const DESATURATION: f32 = 0.6;
const CONTRAST: f32 = 1.25;
/// Exponent above 1 pulls midtones down
const GAMMA: f32 = 1.08;
const VIGNETTE_STRENGTH: f32 = 0.35;

/// Noir grade: low saturation, firm contrast, slightly crushed midtones
pub struct SeriousFilter;

#[inline]
fn gamma_darken(v: u8) -> u8 {
    clamp_byte(255.0 * (v as f32 / 255.0).powf(GAMMA))
}

/// Everything except the vignette
pub(crate) fn grade(frame: &mut PixelBuffer) {
    for px in frame.samples_mut().chunks_exact_mut(CHANNELS) {
        let washed = desaturate([px[0] as f32, px[1] as f32, px[2] as f32], DESATURATION);
        for c in 0..3 {
            px[c] = gamma_darken(contrast(washed[c], CONTRAST));
        }
    }
}

impl Filter for SeriousFilter {
    fn id(&self) -> FilterId {
        FilterId::Serious
    }

    fn apply(&self, frame: &mut PixelBuffer, _rng: &mut dyn RngCore) {
        grade(frame);
        vignette(frame, VIGNETTE_STRENGTH);
    }
}
