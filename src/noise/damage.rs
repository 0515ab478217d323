//! Geometry and per-frame pixel mutation for each noise category.
//!
//! Geometry is sampled once; `render` can then be called on any number of frames. Anything
//! stored here is frozen for the lifetime of an event, anything drawn inside `render` is
//! redrawn every frame. Every extent is clipped against the frame being rendered, so a
//! geometry sampled on a larger frame is still safe on a smaller one.

use std::f32::consts::PI;

use rand::Rng;

use crate::{
    filters::pixel::clamp_byte,
    frame::{PixelBuffer, CHANNELS},
    noise::{NoiseId, NoiseParams},
};

/// One category of tape damage
pub(crate) trait Damage: Sized {
    const ID: NoiseId;

    /// Pick fresh geometry for a `width` x `height` frame; `None` when the frame is empty
    fn sample<R: Rng + ?Sized>(width: u32, height: u32, params: &NoiseParams, rng: &mut R) -> Option<Self>;

    /// Paint the damage onto the frame
    fn render<R: Rng + ?Sized>(&self, frame: &mut PixelBuffer, rng: &mut R);
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// `max(min, floor(total * fraction))`, never larger than `total`
fn extent(total: u32, fraction: f32, min: u32) -> u32 {
    ((total as f32 * fraction).floor() as u32).max(min).min(total)
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, reach: i64) -> i64 {
    rng.gen_range(-reach..=reach)
}

// ----------------------------------------------------------------------------
// dropout
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DropoutMode {
    /// Near-white flicker
    White,
    /// Near-black flicker
    Black,
    /// Each pixel copied from the row above or below
    Smear,
}

/// Upper bound of the band thickness drawn at spawn
fn max_dropout_thickness(size: f32) -> u32 {
    1 + (size * 10.0).floor() as u32
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dropout {
    pub row: u32,
    pub thickness: u32,
    pub mode: DropoutMode,
}

impl Damage for Dropout {
    const ID: NoiseId = NoiseId::Dropout;

    fn sample<R: Rng + ?Sized>(width: u32, height: u32, params: &NoiseParams, rng: &mut R) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let mode = match rng.gen_range(0..3) {
            0 => DropoutMode::White,
            1 => DropoutMode::Black,
            _ => DropoutMode::Smear,
        };
        Some(Self {
            row: rng.gen_range(0..height),
            thickness: rng.gen_range(1..=max_dropout_thickness(params.size)),
            mode,
        })
    }

    fn render<R: Rng + ?Sized>(&self, frame: &mut PixelBuffer, rng: &mut R) {
        let (width, height) = (frame.width(), frame.height());
        let end = self.row.saturating_add(self.thickness).min(height);

        for y in self.row..end {
            for x in 0..width {
                let color = match self.mode {
                    DropoutMode::White => [(); 3].map(|_| (240 + rng.gen_range(-8..=8)) as u8),
                    DropoutMode::Black => [(); 3].map(|_| rng.gen_range(0..=30u8)),
                    DropoutMode::Smear => {
                        let source_y = if rng.gen_bool(0.5) {
                            y.saturating_sub(1)
                        } else {
                            (y + 1).min(height - 1)
                        };
                        frame.rgb(x, source_y)
                    }
                };
                frame.set_rgb(x, y, color);
            }
        }
    }
}

// ----------------------------------------------------------------------------
// block
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Block {
    pub dest: Rect,
    pub src_x: u32,
    pub src_y: u32,
}

impl Damage for Block {
    const ID: NoiseId = NoiseId::Block;

    fn sample<R: Rng + ?Sized>(width: u32, height: u32, params: &NoiseParams, rng: &mut R) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let bw = extent(width, 0.06 + params.size * 0.18, 8);
        let bh = extent(height, 0.04 + params.size * 0.14, 6);
        let dx = rng.gen_range(0..=width - bw);
        let dy = rng.gen_range(0..=height - bh);

        let reach_x = (20.0 + params.magnitude * 80.0).floor() as i64;
        let reach_y = (10.0 + params.magnitude * 60.0).floor() as i64;
        let sx = (dx as i64 + jitter(rng, reach_x)).clamp(0, (width - bw) as i64) as u32;
        let sy = (dy as i64 + jitter(rng, reach_y)).clamp(0, (height - bh) as i64) as u32;

        Some(Self {
            dest: Rect { x: dx, y: dy, width: bw, height: bh },
            src_x: sx,
            src_y: sy,
        })
    }

    fn render<R: Rng + ?Sized>(&self, frame: &mut PixelBuffer, _rng: &mut R) {
        let (width, height) = (frame.width(), frame.height());
        let w = self
            .dest
            .width
            .min(width.saturating_sub(self.dest.x))
            .min(width.saturating_sub(self.src_x));
        let h = self
            .dest
            .height
            .min(height.saturating_sub(self.dest.y))
            .min(height.saturating_sub(self.src_y));
        if w == 0 || h == 0 {
            return;
        }

        // read the whole source first so overlapping rectangles copy cleanly
        let mut source = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                source.push(frame.rgb(self.src_x + x, self.src_y + y));
            }
        }

        let mut colors = source.into_iter();
        for y in 0..h {
            for x in 0..w {
                if let Some(color) = colors.next() {
                    frame.set_rgb(self.dest.x + x, self.dest.y + y, color);
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// tear
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tear {
    pub top: u32,
    pub band_height: u32,
    pub max_shift: u32,
    /// +1 pulls content from the right, -1 from the left
    pub direction: i64,
}

impl Tear {
    /// Horizontal displacement of band row `offset`
    fn shift(&self, offset: u32) -> i64 {
        let phase = offset as f32 / self.band_height as f32 * PI;
        (phase.sin() * self.max_shift as f32).round() as i64 * self.direction
    }
}

impl Damage for Tear {
    const ID: NoiseId = NoiseId::Tear;

    fn sample<R: Rng + ?Sized>(width: u32, height: u32, params: &NoiseParams, rng: &mut R) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let band_height = extent(height, 0.06 + params.size * 0.18, 6);
        Some(Self {
            top: rng.gen_range(0..=height - band_height),
            band_height,
            max_shift: ((4.0 + params.magnitude * 24.0).floor() as u32).max(2),
            direction: if rng.gen_bool(0.5) { 1 } else { -1 },
        })
    }

    fn render<R: Rng + ?Sized>(&self, frame: &mut PixelBuffer, _rng: &mut R) {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 {
            return;
        }
        let stride = width as usize * CHANNELS;
        let last = width as i64 - 1;

        for offset in 0..self.band_height {
            let y = self.top + offset;
            if y >= height {
                break;
            }
            let dx = self.shift(offset);
            if dx == 0 {
                continue;
            }

            let start = y as usize * stride;
            let samples = frame.samples_mut();
            let line = samples[start..start + stride].to_vec();
            for x in 0..width as i64 {
                let sx = (x + dx).clamp(0, last) as usize * CHANNELS;
                let di = start + x as usize * CHANNELS;
                samples[di..di + 3].copy_from_slice(&line[sx..sx + 3]);
            }
        }
    }
}

// ----------------------------------------------------------------------------
// snow
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Snow {
    pub area: Rect,
    /// Chroma wobble added to green and blue
    pub chroma_jitter: i32,
}

impl Damage for Snow {
    const ID: NoiseId = NoiseId::Snow;

    fn sample<R: Rng + ?Sized>(width: u32, height: u32, params: &NoiseParams, rng: &mut R) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let pw = extent(width, 0.04 + params.size * 0.12, 6);
        let ph = extent(height, 0.04 + params.size * 0.12, 6);
        Some(Self {
            area: Rect {
                x: rng.gen_range(0..=width - pw),
                y: rng.gen_range(0..=height - ph),
                width: pw,
                height: ph,
            },
            chroma_jitter: (10.0 + params.magnitude * 20.0).round() as i32,
        })
    }

    fn render<R: Rng + ?Sized>(&self, frame: &mut PixelBuffer, rng: &mut R) {
        let x_end = self.area.x.saturating_add(self.area.width).min(frame.width());
        let y_end = self.area.y.saturating_add(self.area.height).min(frame.height());
        let j = self.chroma_jitter;

        for y in self.area.y..y_end {
            for x in self.area.x..x_end {
                let v = rng.gen_range(0..=255i32);
                let g = v + rng.gen_range(-j..=j);
                let b = v + rng.gen_range(-j..=j);
                frame.set_rgb(x, y, [v as u8, g.clamp(0, 255) as u8, b.clamp(0, 255) as u8]);
            }
        }
    }
}

// ----------------------------------------------------------------------------
// head switching
// ----------------------------------------------------------------------------

const HEADSWITCH_PHASES: [f32; 3] = [0.0, 2.1, 4.2];
const HEADSWITCH_JITTER: i32 = 40;

/// Band anchored to the bottom edge; magnitude plays no part
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeadSwitch {
    pub band_height: u32,
}

impl Damage for HeadSwitch {
    const ID: NoiseId = NoiseId::HeadSwitch;

    fn sample<R: Rng + ?Sized>(width: u32, height: u32, params: &NoiseParams, _rng: &mut R) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            band_height: extent(height, 0.02 + params.size * 0.06, 2),
        })
    }

    fn render<R: Rng + ?Sized>(&self, frame: &mut PixelBuffer, rng: &mut R) {
        let (width, height) = (frame.width(), frame.height());
        let band = self.band_height.min(height);
        let top = height - band;

        for offset in 0..band {
            let phase = offset as f32 / band as f32 * PI * 2.0;
            let bias = HEADSWITCH_PHASES.map(|p| 128.0 + (127.0 * (phase + p).sin()).floor());
            for x in 0..width {
                let color = bias.map(|b| {
                    clamp_byte(b + rng.gen_range(-HEADSWITCH_JITTER..=HEADSWITCH_JITTER) as f32)
                });
                frame.set_rgb(x, top + offset, color);
            }
        }
    }
}
