use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;

use crate::{
    frame::PixelBuffer,
    noise::{
        damage::{Block, Damage, Dropout, HeadSwitch, Snow, Tear},
        NoiseConfig, NoiseId, NoiseParams,
    },
};

/// Event slot for one noise category
#[derive(Debug, Clone)]
enum Slot<D> {
    Idle,
    Active { damage: D, ttl: u32 },
}

impl<D: Damage> Slot<D> {
    fn remaining(&self) -> Option<u32> {
        match self {
            Slot::Idle => None,
            Slot::Active { ttl, .. } => Some(*ttl),
        }
    }

    /// Maybe spawn, then render and age whatever is active
    ///
    /// A disabled category never spawns, but an event already running is drained to the end.
    fn step<R: Rng + ?Sized>(&mut self, params: &NoiseParams, frame: &mut PixelBuffer, rng: &mut R) {
        if matches!(self, Slot::Idle) && params.enabled && rng.gen::<f32>() < params.frequency {
            if let Some(damage) = D::sample(frame.width(), frame.height(), params, rng) {
                let id = D::ID;
                debug!(noise = %id, ttl = params.duration_frames, "noise event started");
                *self = Slot::Active {
                    damage,
                    ttl: params.duration_frames.max(1),
                };
            }
        }

        if let Slot::Active { damage, ttl } = self {
            damage.render(frame, rng);
            *ttl -= 1;
            if *ttl == 0 {
                let id = D::ID;
                debug!(noise = %id, "noise event finished");
                *self = Slot::Idle;
            }
        }
    }
}

/// One slot per category
#[derive(Debug, Clone)]
struct Slots {
    dropout: Slot<Dropout>,
    block: Slot<Block>,
    tear: Slot<Tear>,
    snow: Slot<Snow>,
    headswitch: Slot<HeadSwitch>,
}

impl Slots {
    fn idle() -> Self {
        Self {
            dropout: Slot::Idle,
            block: Slot::Idle,
            tear: Slot::Idle,
            snow: Slot::Idle,
            headswitch: Slot::Idle,
        }
    }

    fn remaining(&self, id: NoiseId) -> Option<u32> {
        match id {
            NoiseId::Dropout => self.dropout.remaining(),
            NoiseId::Block => self.block.remaining(),
            NoiseId::Tear => self.tear.remaining(),
            NoiseId::Snow => self.snow.remaining(),
            NoiseId::HeadSwitch => self.headswitch.remaining(),
        }
    }
}

/// Stateful tape-damage generator
///
/// Holds at most one live event per category. Each [`step`](Self::step) first gives every
/// idle, enabled category a chance to start an event, then paints all live events in category
/// order and counts their lifetimes down. An event keeps the geometry it was spawned with for
/// its whole life.
///
/// Not meant to be shared between threads mid-frame: call `step` and `update_config` from the
/// one loop that owns the engine.
#[derive(Debug, Clone)]
pub struct NoiseEngine {
    config: NoiseConfig,
    slots: Slots,
    rng: SmallRng,
}

impl NoiseEngine {
    /// Create an engine seeded from system entropy
    pub fn new(config: &NoiseConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for reproducible damage
    pub fn with_seed(config: &NoiseConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: &NoiseConfig, rng: SmallRng) -> Self {
        Self {
            config: config.sanitized(),
            slots: Slots::idle(),
            rng,
        }
    }

    /// The configuration currently in effect
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Replace the configuration without touching running events
    ///
    /// The engine keeps its own copy; later changes to `next` have no effect.
    pub fn update_config(&mut self, next: &NoiseConfig) {
        self.config = next.sanitized();
        debug!("noise config replaced");
    }

    /// Advance one frame, mutating `frame` in place
    pub fn step(&mut self, frame: &mut PixelBuffer) {
        let Self { config, slots, rng } = self;

        slots.dropout.step(&config.dropout, frame, rng);
        slots.block.step(&config.block, frame, rng);
        slots.tear.step(&config.tear, frame, rng);
        slots.snow.step(&config.snow, frame, rng);
        slots.headswitch.step(&config.headswitch, frame, rng);
    }

    /// Whether the category currently has a live event
    pub fn is_active(&self, id: NoiseId) -> bool {
        self.slots.remaining(id).is_some()
    }

    /// Frames left for the category's live event, if any
    pub fn remaining_frames(&self, id: NoiseId) -> Option<u32> {
        self.slots.remaining(id)
    }

    /// Number of categories with a live event
    pub fn active_count(&self) -> usize {
        NoiseId::ALL.iter().filter(|&&id| self.is_active(id)).count()
    }

    /// Drop every live event, e.g. when the camera restarts
    pub fn reset(&mut self) {
        self.slots = Slots::idle();
    }

    #[cfg(test)]
    fn force_block(&mut self, block: Block, ttl: u32) {
        self.slots.block = Slot::Active { damage: block, ttl };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::damage::Rect;

    const GRAY: [u8; 4] = [128, 128, 128, 255];

    fn only(id: NoiseId, params: NoiseParams) -> NoiseConfig {
        NoiseConfig::disabled().with(id, params)
    }

    fn bottom_row_touched(frame: &PixelBuffer) -> bool {
        let y = frame.height() - 1;
        (0..frame.width()).any(|x| frame.rgb(x, y) != [128, 128, 128])
    }

    #[test]
    fn test_zero_frequency_never_spawns() {
        for id in NoiseId::ALL {
            let config = only(id, NoiseParams::new(true, 0.0, 1.0, 5, 1.0));
            let mut engine = NoiseEngine::with_seed(&config, 17);
            let mut frame = PixelBuffer::new_filled(32, 24, GRAY);
            let before = frame.clone();

            for _ in 0..200 {
                engine.step(&mut frame);
                assert!(!engine.is_active(id));
            }
            assert_eq!(frame, before, "{} touched the frame", id);
        }
    }

    #[test]
    fn test_disabled_never_spawns() {
        let config = only(NoiseId::Snow, NoiseParams::new(false, 1.0, 1.0, 5, 1.0));
        let mut engine = NoiseEngine::with_seed(&config, 3);
        let mut frame = PixelBuffer::new_filled(16, 16, GRAY);
        for _ in 0..50 {
            engine.step(&mut frame);
        }
        assert_eq!(engine.active_count(), 0);
        assert_eq!(frame, PixelBuffer::new_filled(16, 16, GRAY));
    }

    #[test]
    fn test_event_lives_exactly_duration_steps() {
        let duration = 4;
        let config = only(NoiseId::HeadSwitch, NoiseParams::new(true, 1.0, 0.5, duration, 0.5));
        let mut engine = NoiseEngine::with_seed(&config, 99);

        // first step spawns, then stop further spawns so the event can run out
        let mut frame = PixelBuffer::new_filled(20, 40, GRAY);
        engine.step(&mut frame);
        assert!(bottom_row_touched(&frame));
        assert_eq!(engine.remaining_frames(NoiseId::HeadSwitch), Some(duration - 1));

        let mut quiet = config.clone();
        quiet.headswitch.frequency = 0.0;
        engine.update_config(&quiet);

        for left in (0..duration - 1).rev() {
            let mut frame = PixelBuffer::new_filled(20, 40, GRAY);
            engine.step(&mut frame);
            assert!(bottom_row_touched(&frame));
            assert_eq!(engine.remaining_frames(NoiseId::HeadSwitch), (left > 0).then_some(left));
        }

        let mut frame = PixelBuffer::new_filled(20, 40, GRAY);
        engine.step(&mut frame);
        assert!(!bottom_row_touched(&frame));
        assert!(!engine.is_active(NoiseId::HeadSwitch));
    }

    #[test]
    fn test_disabling_drains_running_event() {
        let config = only(NoiseId::Snow, NoiseParams::new(true, 1.0, 0.5, 3, 0.5));
        let mut engine = NoiseEngine::with_seed(&config, 5);
        let mut frame = PixelBuffer::new_filled(30, 30, GRAY);
        engine.step(&mut frame);
        assert!(engine.is_active(NoiseId::Snow));

        engine.update_config(&NoiseConfig::disabled());
        engine.step(&mut frame);
        assert_eq!(engine.remaining_frames(NoiseId::Snow), Some(1));
        engine.step(&mut frame);
        assert!(!engine.is_active(NoiseId::Snow));

        for _ in 0..20 {
            engine.step(&mut frame);
            assert!(!engine.is_active(NoiseId::Snow));
        }
    }

    #[test]
    fn test_geometry_frozen_across_frames() {
        let config = only(NoiseId::Tear, NoiseParams::new(true, 1.0, 0.8, 4, 0.6));

        let ramp = || {
            let mut frame = PixelBuffer::new_black(48, 48);
            for y in 0..48 {
                for x in 0..48 {
                    frame.set_rgb(x, y, [(x * 5) as u8, (x * 3) as u8, 40]);
                }
            }
            frame
        };

        // frequency 1: the tear starts on the first step
        let mut engine = NoiseEngine::with_seed(&config, 21);
        let mut first = ramp();
        engine.step(&mut first);
        assert_ne!(first, ramp());
        engine.update_config(&NoiseConfig::disabled());

        for _ in 0..3 {
            let mut frame = ramp();
            engine.step(&mut frame);
            assert_eq!(frame, first);
        }
        assert!(!engine.is_active(NoiseId::Tear));

        engine.reset();
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn test_forced_block_copies_every_step() {
        let duration = 3;
        let mut engine = NoiseEngine::with_seed(&NoiseConfig::disabled(), 0);
        engine.force_block(
            Block {
                dest: Rect { x: 0, y: 0, width: 2, height: 2 },
                src_x: 4,
                src_y: 4,
            },
            duration,
        );

        for step in 0..duration {
            let mut frame = PixelBuffer::new_black(8, 8);
            for y in 0..8 {
                for x in 0..8 {
                    frame.set_rgb(x, y, [(x * 30 + step * 3) as u8, (y * 30) as u8, 77]);
                }
            }
            let before = frame.clone();
            engine.step(&mut frame);

            for y in 0..8 {
                for x in 0..8 {
                    if x < 2 && y < 2 {
                        assert_eq!(frame.rgb(x, y), before.rgb(x + 4, y + 4));
                    } else {
                        assert_eq!(frame.rgb(x, y), before.rgb(x, y));
                    }
                }
            }
        }
        assert!(!engine.is_active(NoiseId::Block));
    }

    #[test]
    fn test_config_is_copied_in() {
        let mut config = NoiseConfig::default();
        let engine = NoiseEngine::with_seed(&config, 1);
        config.block.frequency = 1.0;
        assert_eq!(engine.config().block.frequency, NoiseConfig::default().block.frequency);
    }

    #[test]
    fn test_same_seed_same_damage() {
        let config = NoiseConfig::default()
            .with(NoiseId::Snow, NoiseParams::new(true, 0.3, 0.6, 4, 0.5));
        let mut a = NoiseEngine::with_seed(&config, 1234);
        let mut b = NoiseEngine::with_seed(&config, 1234);

        for i in 0..60u32 {
            let mut fa = PixelBuffer::new_filled(40, 30, [(i * 4) as u8, 90, 200, 255]);
            let mut fb = fa.clone();
            a.step(&mut fa);
            b.step(&mut fb);
            assert_eq!(fa, fb);
        }
    }
}
