//! # Frame Driver
//!
//! Reference loop around the pixel pipeline: pull a frame from a [`FrameSource`], run the
//! selected filter and one noise engine step on it, hand it to a [`FrameSink`]. Ticks at a
//! fixed rate; when a frame runs late the missed ticks are skipped rather than queued.
//!
//! ```rust,no_run
//! use retro_camfx::{config::Config, driver::{FrameDriver, NullSink, StillSource}};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> retro_camfx::Result<()> {
//! let config = Config::default();
//! let mut source = StillSource::open("portrait.png", config.driver.max_width)?;
//! let mut driver = FrameDriver::new(&config);
//! let stats = driver.run(&mut source, &mut NullSink, Some(48)).await?;
//! println!("{} frames, {} late", stats.frames_presented, stats.late_frames);
//! # Ok(())
//! # }
//! ```

mod io;

use std::time::{Duration, Instant};

use rand::{rngs::SmallRng, SeedableRng};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::Result,
    filters::{apply_filter, FilterId},
    frame::PixelBuffer,
    noise::{NoiseConfig, NoiseEngine},
};

pub use io::{fit_width, NullSink, PngSequenceSink, StillSource};

/// Highest frame rate a config may ask for
pub const MAX_TARGET_FPS: f64 = 1000.0;

/// Floor for the tick period; a zero period would stall the timer
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Tick period for `fps`, clamped to `MIN_FRAME_INTERVAL`..=1000s
fn frame_interval_for(fps: f64) -> Duration {
    let fps = if fps.is_nan() { 1e-3 } else { fps.clamp(1e-3, MAX_TARGET_FPS) };
    Duration::from_secs_f64(1.0 / fps).max(MIN_FRAME_INTERVAL)
}

/// Supplies raw frames
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<PixelBuffer>>;
}

/// Consumes processed frames
pub trait FrameSink {
    fn present(&mut self, frame: &PixelBuffer, index: u64) -> Result<()>;
}

/// Counters from one [`FrameDriver::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub frames_presented: u64,
    /// Frames whose processing took longer than one frame interval
    pub late_frames: u64,
}

/// Owns the per-session pipeline state: filter selection, noise engine and randomness
pub struct FrameDriver {
    filter: Option<FilterId>,
    engine: NoiseEngine,
    rng: SmallRng,
    frame_interval: Duration,
}

impl FrameDriver {
    /// Create a driver for one camera session
    pub fn new(config: &Config) -> Self {
        let filter = config.driver.filter_id();
        if filter.is_none() {
            warn!("Unknown filter '{}', frames will pass through unfiltered", config.driver.filter);
        }

        let (engine, rng) = match config.driver.seed {
            Some(seed) => (
                NoiseEngine::with_seed(&config.noise, seed),
                SmallRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (NoiseEngine::new(&config.noise), SmallRng::from_entropy()),
        };

        Self {
            filter,
            engine,
            rng,
            frame_interval: frame_interval_for(config.driver.target_fps),
        }
    }

    /// Currently selected filter
    pub fn filter(&self) -> Option<FilterId> {
        self.filter
    }

    /// Switch filters between frames; `None` disables filtering
    pub fn set_filter(&mut self, filter: Option<FilterId>) {
        debug!("Filter set to {:?}", filter);
        self.filter = filter;
    }

    /// Switch filters by name; an unknown name disables filtering
    pub fn select_filter(&mut self, name: &str) -> Option<FilterId> {
        let filter = FilterId::from_name(name);
        if filter.is_none() {
            warn!("Unknown filter '{}', frames will pass through unfiltered", name);
        }
        self.set_filter(filter);
        filter
    }

    /// Replace the noise settings; running noise events carry on
    pub fn update_noise_config(&mut self, next: &NoiseConfig) {
        self.engine.update_config(next);
    }

    pub fn engine(&self) -> &NoiseEngine {
        &self.engine
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Filter, then noise, in place
    pub fn process_frame(&mut self, frame: &mut PixelBuffer) {
        if let Some(id) = self.filter {
            apply_filter(frame, id, &mut self.rng);
        }
        self.engine.step(frame);
    }

    /// Run the capture, process, present loop
    ///
    /// Stops when the source runs dry or after `max_frames` frames.
    pub async fn run<S, K>(&mut self, source: &mut S, sink: &mut K, max_frames: Option<u64>) -> Result<DriverStats>
    where
        S: FrameSource,
        K: FrameSink,
    {
        info!(
            "Starting frame loop at {:.1} fps, filter: {}",
            1.0 / self.frame_interval.as_secs_f64(),
            self.filter.map_or("none", FilterId::as_str)
        );

        let mut ticker = interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut stats = DriverStats::default();

        loop {
            if max_frames.is_some_and(|max| stats.frames_presented >= max) {
                break;
            }
            ticker.tick().await;

            let Some(mut frame) = source.next_frame()? else {
                debug!("Frame source exhausted");
                break;
            };

            let started = Instant::now();
            self.process_frame(&mut frame);
            let elapsed = started.elapsed();
            if elapsed > self.frame_interval {
                stats.late_frames += 1;
                warn!(
                    "Frame {} took {:.1}ms, over the {:.1}ms budget",
                    stats.frames_presented,
                    elapsed.as_secs_f64() * 1000.0,
                    self.frame_interval.as_secs_f64() * 1000.0
                );
            }

            sink.present(&frame, stats.frames_presented)?;
            stats.frames_presented += 1;
        }

        info!(
            "Frame loop finished: {} frames, {} late",
            stats.frames_presented, stats.late_frames
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseId;

    /// Keeps every presented frame
    #[derive(Default)]
    struct VecSink {
        frames: Vec<PixelBuffer>,
    }

    impl FrameSink for VecSink {
        fn present(&mut self, frame: &PixelBuffer, index: u64) -> Result<()> {
            assert_eq!(index as usize, self.frames.len());
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn fast_config(filter: &str) -> Config {
        let mut config = Config::default();
        config.driver.filter = filter.to_string();
        config.driver.target_fps = 1000.0;
        config.driver.seed = Some(11);
        config
    }

    #[tokio::test]
    async fn test_run_stops_at_max_frames() {
        let mut driver = FrameDriver::new(&fast_config("comic"));
        let mut source = StillSource::new(PixelBuffer::new_filled(16, 12, [90, 140, 200, 255]));
        let mut sink = VecSink::default();

        let stats = driver.run(&mut source, &mut sink, Some(3)).await.unwrap();

        assert_eq!(stats.frames_presented, 3);
        assert_eq!(sink.frames.len(), 3);
    }

    #[tokio::test]
    async fn test_run_stops_when_source_ends() {
        let mut driver = FrameDriver::new(&fast_config("vhs"));
        let mut source = StillSource::new(PixelBuffer::new_black(8, 8)).with_limit(2);

        let stats = driver.run(&mut source, &mut NullSink, None).await.unwrap();
        assert_eq!(stats.frames_presented, 2);
    }

    #[test]
    fn test_process_frame_matches_manual_pipeline() {
        let mut config = fast_config("serious");
        config.noise = NoiseConfig::disabled();
        let mut driver = FrameDriver::new(&config);

        let mut frame = PixelBuffer::new_filled(5, 5, [128, 128, 128, 255]);
        driver.process_frame(&mut frame);

        let mut expected = PixelBuffer::new_filled(5, 5, [128, 128, 128, 255]);
        apply_filter(&mut expected, FilterId::Serious, &mut SmallRng::seed_from_u64(0));
        assert_eq!(frame, expected);
    }

    #[test]
    fn test_unknown_filter_passes_through() {
        let mut config = fast_config("sepia");
        config.noise = NoiseConfig::disabled();
        let mut driver = FrameDriver::new(&config);
        assert_eq!(driver.filter(), None);

        let mut frame = PixelBuffer::new_filled(6, 6, [10, 20, 30, 255]);
        driver.process_frame(&mut frame);
        assert_eq!(frame, PixelBuffer::new_filled(6, 6, [10, 20, 30, 255]));

        assert_eq!(driver.select_filter("horror"), Some(FilterId::Horror));
        assert_eq!(driver.select_filter("nope"), None);
    }

    #[test]
    fn test_noise_config_swap_reaches_engine() {
        let mut driver = FrameDriver::new(&fast_config("retro"));
        let quiet = NoiseConfig::disabled();
        driver.update_noise_config(&quiet);
        assert!(!driver.engine().config().get(NoiseId::Dropout).enabled);
        assert_eq!(driver.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_frame_interval_never_zero() {
        for fps in [1e12, f64::INFINITY, f64::NAN, 0.0, -5.0, 24.0] {
            let interval = frame_interval_for(fps);
            assert!(interval >= MIN_FRAME_INTERVAL, "{} fps gave {:?}", fps, interval);
        }
        assert_eq!(frame_interval_for(1e12), MIN_FRAME_INTERVAL);
        assert!((frame_interval_for(24.0).as_secs_f64() - 1.0 / 24.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_unvalidated_runaway_fps_still_runs() {
        let mut config = fast_config("retro");
        config.driver.target_fps = 1e12;
        let mut driver = FrameDriver::new(&config);
        assert_eq!(driver.frame_interval(), MIN_FRAME_INTERVAL);

        let mut source = StillSource::new(PixelBuffer::new_black(4, 4));
        let stats = driver.run(&mut source, &mut NullSink, Some(2)).await.unwrap();
        assert_eq!(stats.frames_presented, 2);
    }
}
