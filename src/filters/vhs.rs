// VHS tape look: scan lines, one glitch row, horizontal chroma misregistration

use rand::{Rng, RngCore};

use crate::{
    filters::{
        pixel::{clamp_byte, desaturate, scanlines},
        Filter, FilterId,
    },
    frame::{PixelBuffer, Snapshot, CHANNELS},
};

const SCANLINE_DARKNESS: f32 = 0.18;
const GLITCH_GAIN: [f32; 3] = [1.3, 1.1, 1.4];
/// Horizontal R/B displacement in pixels
const CHROMA_OFFSET: u32 = 1;
const DESATURATION: f32 = 0.2;

/// VHS-style video effect
pub struct VhsFilter;

impl VhsFilter {
    /// Run the effect against an explicit pre-transform snapshot
    ///
    /// The chroma shift reads red and blue from `snapshot`, so it must hold the frame as it
    /// was before this filter touched it.
    pub fn apply_with_snapshot(
        &self,
        frame: &mut PixelBuffer,
        snapshot: &Snapshot,
        rng: &mut dyn RngCore,
    ) {
        debug_assert_eq!(
            (frame.width(), frame.height()),
            (snapshot.width(), snapshot.height())
        );
        if frame.is_empty() {
            return;
        }

        scanlines(frame, SCANLINE_DARKNESS);
        self.apply_glitch_row(frame, rng);
        self.apply_chroma_shift(frame, snapshot);

        for px in frame.samples_mut().chunks_exact_mut(CHANNELS) {
            let faded = desaturate([px[0] as f32, px[1] as f32, px[2] as f32], DESATURATION);
            for c in 0..3 {
                px[c] = clamp_byte(faded[c]);
            }
        }
    }

    /// Brighten one randomly chosen row
    fn apply_glitch_row(&self, frame: &mut PixelBuffer, rng: &mut dyn RngCore) {
        let row = rng.gen_range(0..frame.height());
        let stride = frame.width() as usize * CHANNELS;
        let start = row as usize * stride;

        for px in frame.samples_mut()[start..start + stride].chunks_exact_mut(CHANNELS) {
            for c in 0..3 {
                px[c] = clamp_byte(px[c] as f32 * GLITCH_GAIN[c]);
            }
        }
    }

    /// Red comes from the left neighbour, blue from the right, green stays
    fn apply_chroma_shift(&self, frame: &mut PixelBuffer, snapshot: &Snapshot) {
        let width = frame.width();
        let last = width - 1;

        for y in 0..frame.height() {
            for x in 0..width {
                let red = snapshot.rgb(x.saturating_sub(CHROMA_OFFSET), y)[0];
                let blue = snapshot.rgb((x + CHROMA_OFFSET).min(last), y)[2];
                let i = frame.offset(x, y);
                let samples = frame.samples_mut();
                samples[i] = red;
                samples[i + 2] = blue;
            }
        }
    }
}

impl Filter for VhsFilter {
    fn id(&self) -> FilterId {
        FilterId::Vhs
    }

    fn apply(&self, frame: &mut PixelBuffer, rng: &mut dyn RngCore) {
        let snapshot = frame.snapshot();
        self.apply_with_snapshot(frame, &snapshot, rng);
    }
}
