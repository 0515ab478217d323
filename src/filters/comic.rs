use rand::RngCore;

use crate::{
    filters::{
        pixel::{clamp_byte, luma},
        Filter, FilterId,
    },
    frame::{PixelBuffer, Snapshot, CHANNELS},
};

const LEVELS: u32 = 6;
/// Gradient magnitude above which a pixel is inked
const EDGE_THRESHOLD: f32 = 100.0;

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Posterized color with black outlines traced on the original image
pub struct ComicFilter;

#[inline]
fn posterize(v: u8) -> u8 {
    let step = 255.0 / (LEVELS - 1) as f32;
    clamp_byte((v as f32 / step).round() * step)
}

impl ComicFilter {
    /// Run the effect against an explicit pre-transform snapshot
    ///
    /// Edges are detected on `snapshot`, not on the posterized output.
    pub fn apply_with_snapshot(&self, frame: &mut PixelBuffer, snapshot: &Snapshot) {
        debug_assert_eq!(
            (frame.width(), frame.height()),
            (snapshot.width(), snapshot.height())
        );

        for px in frame.samples_mut().chunks_exact_mut(CHANNELS) {
            for c in &mut px[..3] {
                *c = posterize(*c);
            }
        }

        let (w, h) = (snapshot.width() as usize, snapshot.height() as usize);
        if w < 3 || h < 3 {
            return;
        }

        let gray: Vec<u8> = snapshot
            .samples()
            .chunks_exact(CHANNELS)
            .map(|px| clamp_byte(luma(px[0] as f32, px[1] as f32, px[2] as f32)))
            .collect();

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let mut gx = 0.0;
                let mut gy = 0.0;
                let mut k = 0;
                for j in y - 1..=y + 1 {
                    for i in x - 1..=x + 1 {
                        let v = gray[j * w + i] as f32;
                        gx += v * SOBEL_X[k];
                        gy += v * SOBEL_Y[k];
                        k += 1;
                    }
                }

                if (gx * gx + gy * gy).sqrt() > EDGE_THRESHOLD {
                    frame.set_rgb(x as u32, y as u32, [0, 0, 0]);
                }
            }
        }
    }
}

impl Filter for ComicFilter {
    fn id(&self) -> FilterId {
        FilterId::Comic
    }

    fn apply(&self, frame: &mut PixelBuffer, _rng: &mut dyn RngCore) {
        let snapshot = frame.snapshot();
        self.apply_with_snapshot(frame, &snapshot);
    }
}
