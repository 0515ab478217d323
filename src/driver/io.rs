use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use image::{imageops, imageops::FilterType, RgbaImage};
use tracing::{debug, info};

use crate::{
    driver::{FrameSink, FrameSource},
    error::{FrameError, Result},
    frame::PixelBuffer,
};

/// Scale an image down to `max_width`, keeping its aspect ratio
///
/// Narrower images come back untouched.
pub fn fit_width(image: RgbaImage, max_width: u32) -> RgbaImage {
    if max_width == 0 || image.width() <= max_width {
        return image;
    }
    let height = (image.height() as u64 * max_width as u64 / image.width() as u64).max(1) as u32;
    debug!(
        "Scaling {}x{} source down to {}x{}",
        image.width(),
        image.height(),
        max_width,
        height
    );
    imageops::resize(&image, max_width, height, FilterType::Triangle)
}

/// Camera stand-in that serves the same still image over and over
pub struct StillSource {
    frame: PixelBuffer,
    remaining: Option<u64>,
}

impl StillSource {
    pub fn new(frame: PixelBuffer) -> Self {
        Self {
            frame,
            remaining: None,
        }
    }

    /// Decode an image file, scaled down to `max_width`
    ///
    /// A file that cannot be read is a [`FrameError::LoadFailed`]; bytes that do not decode
    /// surface as the codec's own error.
    pub fn open<P: AsRef<Path>>(path: P, max_width: u32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|_| FrameError::LoadFailed {
            path: path.display().to_string(),
        })?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        let image = fit_width(image, max_width);
        info!("Loaded {:?} as {}x{} source", path, image.width(), image.height());
        Ok(Self::new(PixelBuffer::new(image)))
    }

    /// Stop after `frames` frames
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameSource for StillSource {
    fn next_frame(&mut self) -> Result<Option<PixelBuffer>> {
        match &mut self.remaining {
            Some(0) => return Ok(None),
            Some(n) => *n -= 1,
            None => {}
        }
        Ok(Some(self.frame.clone()))
    }
}

/// Writes every frame to `frame_00000.png`, `frame_00001.png`, ...
pub struct PngSequenceSink {
    dir: PathBuf,
}

impl PngSequenceSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", index))
    }
}

impl FrameSink for PngSequenceSink {
    fn present(&mut self, frame: &PixelBuffer, index: u64) -> Result<()> {
        frame.save_png(self.frame_path(index))
    }
}

/// Discards frames
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &PixelBuffer, _index: u64) -> Result<()> {
        Ok(())
    }
}
