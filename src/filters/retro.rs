use rand::{Rng, RngCore};

use crate::{
    filters::{
        pixel::{clamp_byte, scanlines, vignette},
        Filter, FilterId,
    },
    frame::{PixelBuffer, CHANNELS},
};

const GRAIN_AMPLITUDE: f32 = 9.0;
const VIGNETTE_STRENGTH: f32 = 0.45;
const SCANLINE_DARKNESS: f32 = 0.15;

/// Sepia film look: sepia matrix, per-pixel grain, vignette, scanlines
pub struct RetroFilter;

/// Classic sepia color matrix
#[inline]
fn sepia(r: f32, g: f32, b: f32) -> [f32; 3] {
    [
        0.393 * r + 0.769 * g + 0.189 * b,
        0.349 * r + 0.686 * g + 0.168 * b,
        0.272 * r + 0.534 * g + 0.131 * b,
    ]
}

/// Sepia plus grain, before the vignette and scanlines
fn tone(frame: &mut PixelBuffer, rng: &mut dyn RngCore) {
    for px in frame.samples_mut().chunks_exact_mut(CHANNELS) {
        let toned = sepia(px[0] as f32, px[1] as f32, px[2] as f32);
        // one grain draw shared by all three channels
        let grain = rng.gen_range(-GRAIN_AMPLITUDE..=GRAIN_AMPLITUDE);
        for (c, v) in px[..3].iter_mut().zip(toned) {
            *c = clamp_byte(v + grain);
        }
    }
}

impl Filter for RetroFilter {
    fn id(&self) -> FilterId {
        FilterId::Retro
    }

    fn apply(&self, frame: &mut PixelBuffer, rng: &mut dyn RngCore) {
        tone(frame, rng);
        vignette(frame, VIGNETTE_STRENGTH);
        scanlines(frame, SCANLINE_DARKNESS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_sepia_weights() {
        let [r, g, b] = sepia(100.0, 100.0, 100.0);
        assert!((r - 135.1).abs() < 1e-3);
        assert!((g - 120.3).abs() < 1e-3);
        assert!((b - 93.7).abs() < 1e-3);
    }

    #[test]
    fn test_white_saturates_red_and_green() {
        let mut frame = PixelBuffer::new_filled(3, 3, [255, 255, 255, 255]);
        RetroFilter.apply(&mut frame, &mut SmallRng::seed_from_u64(11));

        // center pixel sits on an odd row and is not vignetted
        let [r, g, b] = frame.rgb(1, 1);
        assert_eq!(r, 255);
        assert_eq!(g, 255);
        // blue lands near 238 plus grain
        assert!((229..=248).contains(&b), "blue = {}", b);
    }

    #[test]
    fn test_grain_shared_across_channels() {
        let mut frame = PixelBuffer::new_filled(16, 16, [100, 100, 100, 255]);
        tone(&mut frame, &mut SmallRng::seed_from_u64(31));

        let expected = sepia(100.0, 100.0, 100.0);
        let mut largest = 0.0f32;
        for y in 0..16 {
            for x in 0..16 {
                let got = frame.rgb(x, y);
                let offsets: [f32; 3] = std::array::from_fn(|c| got[c] as f32 - expected[c]);
                // each channel rounds on its own, so offsets agree to within one step
                for pair in [(0, 1), (1, 2), (0, 2)] {
                    assert!((offsets[pair.0] - offsets[pair.1]).abs() <= 1.0, "{:?} at ({}, {})", offsets, x, y);
                }
                largest = largest.max(offsets[0].abs());
            }
        }
        // the grain itself is not zero everywhere
        assert!(largest > 2.0);
    }

    #[test]
    fn test_grain_stays_within_amplitude() {
        let mut frame = PixelBuffer::new_filled(9, 9, [100, 100, 100, 255]);
        RetroFilter.apply(&mut frame, &mut SmallRng::seed_from_u64(4));

        // odd row, center column: only sepia plus grain
        let [r, g, b] = frame.rgb(4, 3);
        let expected = sepia(100.0, 100.0, 100.0);
        // one row above center of a 9x9 frame
        let vig = 1.0 - VIGNETTE_STRENGTH / 32.0;
        for (got, want) in [r, g, b].into_iter().zip(expected) {
            let diff = got as f32 - want * vig;
            assert!(diff.abs() <= GRAIN_AMPLITUDE + 1.5, "diff = {}", diff);
        }
    }
}
