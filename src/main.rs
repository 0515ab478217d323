use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use retro_camfx::{
    catalog,
    config::Config,
    driver::{FrameDriver, PngSequenceSink, StillSource},
};

#[derive(Parser)]
#[command(
    name = "retro-camfx",
    version,
    about = "Run still images through the retro camera pipeline",
    long_about = "Retro-CamFX feeds an image through one of its retro filters and the tape-damage engine at a fixed frame rate, writing every processed frame out as a numbered PNG."
)]
struct Cli {
    /// Source image standing in for the camera (PNG, JPEG)
    #[arg(required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Directory receiving the numbered frames
    #[arg(short, long, default_value = "frames")]
    output: PathBuf,

    /// Filter to apply (retro, horror, serious, vhs, comic)
    #[arg(short, long)]
    filter: Option<String>,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value_t = 48)]
    frames: u64,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// List filters and noise categories, then exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_catalog() {
    println!("Filters:");
    for spec in catalog::FILTERS {
        println!("  {:<10} {} - {}", spec.id.as_str(), spec.label, spec.description);
    }
    println!("Noise:");
    for spec in catalog::NOISES {
        println!("  {:<10} {} - {}", spec.id.as_str(), spec.label, spec.description);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        print_catalog();
        return Ok(());
    }

    // Initialize logging; RUST_LOG overrides --verbose
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Retro-CamFX v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if let Some(filter) = cli.filter {
        config.driver.filter = filter;
    }
    if cli.seed.is_some() {
        config.driver.seed = cli.seed;
    }
    config.validate()?;

    let input = cli
        .input
        .ok_or_else(|| anyhow::anyhow!("No input image given"))?;
    info!("Input: {:?}", input);
    info!("Output: {:?}", cli.output);

    let mut source = StillSource::open(&input, config.driver.max_width)?.with_limit(cli.frames);
    let mut sink = PngSequenceSink::new(&cli.output)?;
    let mut driver = FrameDriver::new(&config);

    let stats = driver.run(&mut source, &mut sink, Some(cli.frames)).await?;

    info!(
        "Done! {} frames saved to {:?} ({} over budget)",
        stats.frames_presented, cli.output, stats.late_frames
    );
    Ok(())
}
