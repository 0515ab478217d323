use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{FrameError, Result};

/// Number of interleaved samples per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// A single camera frame
///
/// Thin wrapper around an RGBA image buffer. The sample array is always exactly
/// `width * height * 4` bytes, row-major, which `RgbaImage` guarantees on construction.
/// Filters and the noise engine mutate it in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    buffer: RgbaImage,
}

impl PixelBuffer {
    /// Wrap an existing RGBA image
    pub fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    /// Create an opaque black frame
    pub fn new_black(width: u32, height: u32) -> Self {
        Self::new_filled(width, height, [0, 0, 0, 255])
    }

    /// Create a frame filled with the given RGBA color
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba(color));
        Self { buffer }
    }

    /// Build a frame from raw interleaved RGBA samples
    ///
    /// Fails when `samples.len()` disagrees with the declared dimensions.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let len = samples.len();
        if len != width as usize * height as usize * CHANNELS {
            return Err(FrameError::DimensionMismatch { width, height, len }.into());
        }
        ImageBuffer::from_raw(width, height, samples)
            .map(|buffer| Self { buffer })
            .ok_or_else(|| FrameError::DimensionMismatch { width, height, len }.into())
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// True when the frame has no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Byte offset of pixel `(x, y)` in the sample array
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width() as usize + x as usize) * CHANNELS
    }

    /// The raw sample array
    pub fn samples(&self) -> &[u8] {
        &self.buffer
    }

    /// The raw sample array, mutable
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Color channels of pixel `(x, y)`
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        let s = self.samples();
        [s[i], s[i + 1], s[i + 2]]
    }

    /// Overwrite the color channels of pixel `(x, y)`, leaving alpha alone
    pub fn set_rgb(&mut self, x: u32, y: u32, color: [u8; 3]) {
        let i = self.offset(x, y);
        self.samples_mut()[i..i + 3].copy_from_slice(&color);
    }

    /// Take a read-only copy of the current samples
    ///
    /// Filters that need the pre-transform image take one of these on entry and drop it
    /// before returning.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            height: self.height(),
            samples: self.samples().to_vec(),
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Save the frame as a PNG file
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.buffer.save(path).map_err(|e| {
            FrameError::SaveFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Immutable copy of a frame's samples taken at a point in time
#[derive(Clone, Debug)]
pub struct Snapshot {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Color channels of pixel `(x, y)`
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.samples[i], self.samples[i + 1], self.samples[i + 2]]
    }
}
