use rand::{Rng, RngCore};

use crate::{
    filters::{
        pixel::{clamp_byte, contrast, desaturate, scanlines, vignette},
        Filter, FilterId,
    },
    frame::{PixelBuffer, CHANNELS},
};

const DESATURATION: f32 = 0.7;
const COLD_CAST: [f32; 3] = [0.92, 1.08, 0.95];
const CONTRAST: f32 = 1.45;
const SHADOW_THRESHOLD: f32 = 80.0;
const SHADOW_NOISE: f32 = 12.0;
const SHADOW_NOISE_SPLIT: [f32; 3] = [1.0, 0.6, 0.4];
const VIGNETTE_STRENGTH: f32 = 0.6;
const SCANLINE_DARKNESS: f32 = 0.1;

/// Cold, washed-out horror grade with noisy shadows
pub struct HorrorFilter;

impl Filter for HorrorFilter {
    fn id(&self) -> FilterId {
        FilterId::Horror
    }

    fn apply(&self, frame: &mut PixelBuffer, rng: &mut dyn RngCore) {
        for px in frame.samples_mut().chunks_exact_mut(CHANNELS) {
            let washed = desaturate([px[0] as f32, px[1] as f32, px[2] as f32], DESATURATION);

            let mut graded = [0u8; 3];
            for c in 0..3 {
                graded[c] = contrast(washed[c] * COLD_CAST[c], CONTRAST);
            }

            let brightness = graded.iter().map(|&v| v as f32).sum::<f32>() / 3.0;
            let noise = if brightness < SHADOW_THRESHOLD {
                rng.gen_range(-SHADOW_NOISE..=SHADOW_NOISE)
            } else {
                0.0
            };

            for c in 0..3 {
                px[c] = clamp_byte(graded[c] as f32 + noise * SHADOW_NOISE_SPLIT[c]);
            }
        }

        vignette(frame, VIGNETTE_STRENGTH);
        scanlines(frame, SCANLINE_DARKNESS);
    }
}
