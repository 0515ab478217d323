#![allow(dead_code)]

use rand::{rngs::SmallRng, Rng, SeedableRng};
use retro_camfx::PixelBuffer;

pub const MID_GRAY: [u8; 4] = [128, 128, 128, 255];

/// Horizontal red ramp, vertical green ramp, constant blue
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut frame = PixelBuffer::new_black(width, height);
    for y in 0..height {
        for x in 0..width {
            frame.set_rgb(x, y, [(x * 255 / width.max(2)) as u8, (y * 255 / height.max(2)) as u8, 96]);
        }
    }
    frame
}

/// Uniformly random RGB with opaque alpha
pub fn random_frame(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut frame = PixelBuffer::new_black(width, height);
    for y in 0..height {
        for x in 0..width {
            frame.set_rgb(x, y, rng.gen());
        }
    }
    frame
}

pub fn alpha_channel(frame: &PixelBuffer) -> Vec<u8> {
    frame.samples().chunks_exact(4).map(|px| px[3]).collect()
}
