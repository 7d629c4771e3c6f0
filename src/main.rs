//! Photolink CLI
//!
//! Command-line interface for testing and demonstrating the optical
//! blink-channel receiver against a synthetic transmission.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use photolink::{
    capture::{BlinkSource, FileConfig, FrameSource},
    decode::DecodedEvent,
    pipeline::SignalPipeline,
};
use tracing::{info, warn};

/// Decode a Manchester-coded blink transmission from synthetic video.
#[derive(Debug, Parser)]
#[command(name = "photolink", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Message the mock source transmits.
    #[arg(long, default_value = "HELLO, WORLD")]
    message: String,

    /// Override the configured gain.
    #[arg(long)]
    gain: Option<f64>,

    /// Override the configured hysteresis threshold.
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the configured frame budget.
    #[arg(long)]
    frames: Option<u32>,

    /// Keep processing idle frames until interrupted.
    #[arg(long)]
    continuous: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Photolink receiver v{}", photolink::VERSION);
    info!("This is a demonstration using a synthetic blink source");

    let config = match cli.config {
        Some(ref path) => match FileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let mut source = BlinkSource::new(cli.message.as_bytes(), config.decoder.half_bit_ticks);
    if let Err(e) = source.open(&config.capture) {
        eprintln!("Failed to open source: {}", e);
        std::process::exit(1);
    }

    let mut pipeline = match SignalPipeline::new(&config.decoder) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid decoder configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Tuning overrides take effect without a pipeline restart.
    if let Some(gain) = cli.gain {
        if let Err(e) = pipeline.set_gain(gain) {
            eprintln!("Invalid gain: {}", e);
            std::process::exit(1);
        }
    }
    if let Some(threshold) = cli.threshold {
        if let Err(e) = pipeline.set_threshold(threshold) {
            eprintln!("Invalid threshold: {}", e);
            std::process::exit(1);
        }
    }

    let continuous = cli.continuous || config.output.continuous;
    let frame_budget = cli.frames.unwrap_or(config.output.frame_count);

    let running = Arc::new(AtomicBool::new(true));
    if continuous {
        let flag = running.clone();
        if let Err(e) = ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst)) {
            warn!("Failed to install interrupt handler: {}", e);
        }
    }

    info!(
        transmission_frames = source.transmission_frames(),
        frame_budget, continuous, "Processing frames..."
    );

    let mut decoded = String::new();
    let mut locks = 0u32;
    let mut delivered = 0u32;
    let mut ended = false;

    while running.load(Ordering::SeqCst) && (continuous || delivered < frame_budget) {
        let frame = match source.next_frame() {
            Ok(Some(f)) => f,
            Ok(None) => continue, // not ready: skip the tick
            Err(e) => {
                warn!("Frame delivery failed: {}", e);
                break;
            }
        };
        delivered += 1;

        match pipeline.process(&frame) {
            Some(DecodedEvent::Lock) => {
                locks += 1;
                info!(tick = pipeline.ticks(), "carrier lock");
            }
            Some(DecodedEvent::Character(c)) => decoded.push(c),
            Some(DecodedEvent::End) => {
                info!(tick = pipeline.ticks(), "end of transmission");
                ended = true;
                if !continuous {
                    break;
                }
            }
            None => {}
        }
    }

    info!(
        frames = delivered,
        locks,
        characters = decoded.len(),
        ended,
        "Done"
    );

    println!("Decoded: {}", decoded);

    if !ended {
        warn!("Transmission did not complete within the frame budget");
    }
}
