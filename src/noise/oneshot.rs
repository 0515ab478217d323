//! Stateless single-frame noise driven by one 0-100 strength value.

use rand::Rng;

use crate::{
    frame::PixelBuffer,
    noise::{
        damage::{Block, Damage, Dropout, HeadSwitch, Snow, Tear},
        NoiseId, NoiseParams,
    },
};

/// Spawn chance at strength 0 and how much full strength adds to it
fn chance_curve(id: NoiseId) -> (f32, f32) {
    match id {
        NoiseId::Dropout => (0.25, 0.55),
        NoiseId::Block => (0.15, 0.45),
        NoiseId::Tear => (0.18, 0.5),
        NoiseId::Snow => (0.25, 0.6),
        NoiseId::HeadSwitch => (0.15, 0.5),
    }
}

/// Chance that a strength-0 call does anything
pub fn base_chance(id: NoiseId) -> f32 {
    chance_curve(id).0
}

fn normalized(strength: u32) -> f32 {
    strength.min(100) as f32 / 100.0
}

/// Settings equivalent to a strength value: one-frame events, magnitude and size both follow
/// strength, frequency climbs linearly from the category's base chance
pub fn params_for_strength(id: NoiseId, strength: u32) -> NoiseParams {
    let s = normalized(strength);
    let (base, slope) = chance_curve(id);
    NoiseParams::new(true, base + s * slope, s, 1, s)
}

/// How many independent hits one call lays down
fn strikes(id: NoiseId, s: f32) -> u32 {
    let per_strength = match id {
        NoiseId::Dropout | NoiseId::Block => 3.0,
        NoiseId::Snow => 4.0,
        NoiseId::Tear | NoiseId::HeadSwitch => 0.0,
    };
    1 + (s * per_strength).floor() as u32
}

fn strike<D: Damage, R: Rng + ?Sized>(frame: &mut PixelBuffer, params: &NoiseParams, count: u32, rng: &mut R) {
    for _ in 0..count {
        if let Some(damage) = D::sample(frame.width(), frame.height(), params, rng) {
            damage.render(frame, rng);
        }
    }
}

/// Apply one category of damage to a single frame
///
/// Works on a private copy and commits it only when the spawn draw succeeds, so a miss leaves
/// `frame` byte-for-byte unchanged.
pub fn apply_noise<R: Rng + ?Sized>(frame: &mut PixelBuffer, id: NoiseId, strength: u32, rng: &mut R) {
    let params = params_for_strength(id, strength);
    if rng.gen::<f32>() >= params.frequency {
        return;
    }

    let mut scratch = frame.clone();
    let count = strikes(id, params.size);
    match id {
        NoiseId::Dropout => strike::<Dropout, R>(&mut scratch, &params, count, rng),
        NoiseId::Block => strike::<Block, R>(&mut scratch, &params, count, rng),
        NoiseId::Tear => strike::<Tear, R>(&mut scratch, &params, count, rng),
        NoiseId::Snow => strike::<Snow, R>(&mut scratch, &params, count, rng),
        NoiseId::HeadSwitch => strike::<HeadSwitch, R>(&mut scratch, &params, count, rng),
    }
    *frame = scratch;
}

/// Apply damage selected by name; unknown names leave the frame untouched
pub fn apply_noise_named<R: Rng + ?Sized>(frame: &mut PixelBuffer, name: &str, strength: u32, rng: &mut R) {
    if let Some(id) = NoiseId::from_name(name) {
        apply_noise(frame, id, strength, rng);
    }
}
