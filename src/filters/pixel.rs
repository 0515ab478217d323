//! Shared per-pixel math used by the filters.

use crate::frame::{PixelBuffer, CHANNELS};

/// Round and saturate to a byte
#[inline]
pub fn clamp_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Perceptual grayscale weight (Rec. 709)
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Stretch a channel away from mid-gray by `factor`
#[inline]
pub fn contrast(v: f32, factor: f32) -> u8 {
    clamp_byte((v - 128.0) * factor + 128.0)
}

/// Blend each channel `amount` of the way toward the pixel's luma
#[inline]
pub fn desaturate(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    let gray = luma(rgb[0], rgb[1], rgb[2]);
    rgb.map(|c| c * (1.0 - amount) + gray * amount)
}

/// Darken toward the corners
///
/// Each pixel is scaled by `1 - strength * (d / max_d)^2`, where `d` is the distance from the
/// pixel center to the image center. The falloff is symmetric under horizontal and vertical
/// flips, and on odd-sized frames the center pixel is left untouched.
pub fn vignette(frame: &mut PixelBuffer, strength: f32) {
    if frame.is_empty() {
        return;
    }
    let width = frame.width() as usize;
    let cx = (frame.width() as f32 - 1.0) * 0.5;
    let cy = (frame.height() as f32 - 1.0) * 0.5;
    let max_d2 = cx * cx + cy * cy;
    if max_d2 <= 0.0 {
        return;
    }

    for (y, row) in frame.samples_mut().chunks_exact_mut(width * CHANNELS).enumerate() {
        let dy = y as f32 - cy;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = x as f32 - cx;
            let factor = 1.0 - strength * (dx * dx + dy * dy) / max_d2;
            for c in &mut px[..3] {
                *c = clamp_byte(*c as f32 * factor);
            }
        }
    }
}

/// Darken every even row by `darkness`
pub fn scanlines(frame: &mut PixelBuffer, darkness: f32) {
    if frame.is_empty() {
        return;
    }
    let stride = frame.width() as usize * CHANNELS;
    let factor = 1.0 - darkness;

    for row in frame.samples_mut().chunks_exact_mut(stride).step_by(2) {
        for px in row.chunks_exact_mut(CHANNELS) {
            for c in &mut px[..3] {
                *c = clamp_byte(*c as f32 * factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_byte_rounds_and_saturates() {
        assert_eq!(clamp_byte(-3.0), 0);
        assert_eq!(clamp_byte(300.0), 255);
        assert_eq!(clamp_byte(12.5), 13);
        assert_eq!(clamp_byte(12.49), 12);
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        assert_eq!(contrast(128.0, 3.0), 128);
        assert_eq!(contrast(138.0, 2.0), 148);
        assert_eq!(contrast(10.0, 2.0), 0);
    }

    #[test]
    fn test_luma_of_gray_is_identity() {
        assert!((luma(77.0, 77.0, 77.0) - 77.0).abs() < 1e-3);
    }

    #[test]
    fn test_vignette_center_and_corners() {
        let mut frame = PixelBuffer::new_filled(5, 5, [200, 200, 200, 255]);
        vignette(&mut frame, 0.5);

        assert_eq!(frame.rgb(2, 2), [200, 200, 200]);
        for (x, y) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
            assert_eq!(frame.rgb(x, y), [100, 100, 100]);
        }
        // alpha untouched
        assert!(frame.samples().chunks_exact(CHANNELS).all(|px| px[3] == 255));
    }

    #[test]
    fn test_vignette_is_flip_symmetric() {
        let (w, h) = (7u32, 4u32);
        let mut frame = PixelBuffer::new_filled(w, h, [180, 180, 180, 255]);
        vignette(&mut frame, 0.8);

        for y in 0..h {
            for x in 0..w {
                assert_eq!(frame.rgb(x, y), frame.rgb(w - 1 - x, h - 1 - y));
                assert_eq!(frame.rgb(x, y), frame.rgb(w - 1 - x, y));
            }
        }
        assert!(frame.rgb(0, 0)[0] < frame.rgb(3, 1)[0]);
    }

    #[test]
    fn test_vignette_single_pixel_untouched() {
        let mut frame = PixelBuffer::new_filled(1, 1, [90, 90, 90, 255]);
        vignette(&mut frame, 1.0);
        assert_eq!(frame.rgb(0, 0), [90, 90, 90]);
    }

    #[test]
    fn test_scanlines_even_rows_only() {
        let mut frame = PixelBuffer::new_filled(3, 4, [100, 150, 201, 255]);
        let before = frame.clone();
        scanlines(&mut frame, 0.2);

        for y in 0..4 {
            for x in 0..3 {
                if y % 2 == 1 {
                    assert_eq!(frame.rgb(x, y), before.rgb(x, y));
                } else {
                    assert_eq!(frame.rgb(x, y), [80, 120, 161]);
                }
            }
        }
    }

    #[test]
    fn test_empty_frame_is_noop() {
        let mut frame = PixelBuffer::new_black(0, 0);
        vignette(&mut frame, 0.5);
        scanlines(&mut frame, 0.5);
        assert!(frame.samples().is_empty());
    }
}
