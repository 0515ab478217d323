// Renders every filter and every noise category onto a synthetic test card

use std::path::PathBuf;

use rand::{rngs::SmallRng, SeedableRng};
use retro_camfx::{
    apply_filter, apply_noise, FilterId, NoiseConfig, NoiseEngine, NoiseId, NoiseParams, PixelBuffer,
};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;
const MAX_NOISE_ATTEMPTS: u32 = 32;

/// Color bars over a luma ramp with a grid, so each effect has edges and gradients to chew on
fn test_card() -> PixelBuffer {
    const BARS: [[u8; 3]; 7] = [
        [192, 192, 192],
        [192, 192, 0],
        [0, 192, 192],
        [0, 192, 0],
        [192, 0, 192],
        [192, 0, 0],
        [0, 0, 192],
    ];

    let mut frame = PixelBuffer::new_black(WIDTH, HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let color = if y < HEIGHT * 2 / 3 {
                BARS[(x * BARS.len() as u32 / WIDTH) as usize]
            } else {
                let v = (x * 255 / (WIDTH - 1)) as u8;
                [v, v, v]
            };
            let color = if x % 40 == 0 || y % 40 == 0 { [255, 255, 255] } else { color };
            frame.set_rgb(x, y, color);
        }
    }
    frame
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "gallery".to_string()));
    std::fs::create_dir_all(&out_dir)?;
    let mut rng = SmallRng::seed_from_u64(1985);

    println!("Rendering gallery into {:?}", out_dir);

    let card = test_card();
    card.save_png(out_dir.join("card.png"))?;

    // 1. Filters
    for id in FilterId::ALL {
        let mut frame = card.clone();
        apply_filter(&mut frame, id, &mut rng);
        frame.save_png(out_dir.join(format!("filter_{}.png", id)))?;
        println!("   filter {:<8} ok", id.as_str());
    }

    // 2. One-shot noise at full strength
    for id in NoiseId::ALL {
        let mut frame = card.clone();
        // retry a few times until the spawn draw hits
        let mut attempts = 0;
        while frame == card && attempts < MAX_NOISE_ATTEMPTS {
            apply_noise(&mut frame, id, 100, &mut rng);
            attempts += 1;
        }
        frame.save_png(out_dir.join(format!("noise_{}.png", id)))?;
        if frame == card {
            println!("   noise  {:<10} no visible hit after {} attempts", id.as_str(), attempts);
        } else {
            println!("   noise  {:<10} ok", id.as_str());
        }
    }

    // 3. A short engine run with every category switched on
    let mut config = NoiseConfig::disabled();
    for id in NoiseId::ALL {
        config = config.with(id, NoiseParams::new(true, 0.2, 0.7, 6, 0.4));
    }
    let mut engine = NoiseEngine::with_seed(&config, 1985);
    for index in 0..12 {
        let mut frame = card.clone();
        apply_filter(&mut frame, FilterId::Vhs, &mut rng);
        engine.step(&mut frame);
        frame.save_png(out_dir.join(format!("engine_{:02}.png", index)))?;
    }
    println!("   engine run ok ({} events still live)", engine.active_count());

    println!("Done.");
    Ok(())
}
