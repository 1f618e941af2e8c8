//! # Snapshot
//!
//! Renders the funnel without opening a window and writes the final frame
//! to a PNG.
//!
//! Run with: `cargo run --example snapshot --release -- [frames] [out.png]`

use singularity::Simulation;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let out = args.next().unwrap_or_else(|| "singularity.png".to_string());

    let frame = Simulation::new()
        .with_seed(42)
        .render_headless(1280, 720, 1.0, frames, 1000.0 / 60.0)?;
    frame.save_png(&out)?;

    log::info!("Wrote {} frames to {}", frames, out);
    Ok(())
}
