//! Walks a red pixel along the strip, then fades it out.
//!
//! Demonstrates:
//! - Connecting and reading the strip length
//! - Buffered drawing with autoshow off
//! - Restricting the addressable window
//! - Shifting and dimming
//!
//! Usage:
//!   cargo run --example strip_demo
//!   cargo run --example strip_demo -- --host 192.168.1.20 --port 8000
//!   cargo run --example strip_demo -- --debug --no-wait

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use common::Args;
use owls_client::{AutoShow, Result, Session, ShiftDirection};
use tokio::time::sleep;

// ============================================================================
// Constants
// ============================================================================

const STEP: Duration = Duration::from_millis(50);

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== Strip Demo ===\n");

    // ========================================================================
    // Connect
    // ========================================================================

    println!("[1] Connecting to {}:{}...", args.host, args.port);

    let session = Session::new();
    let ready = session.connect(&args.host, args.port).await?;

    println!("    ✓ Strip has {} pixels\n", ready.pixel_count);

    // ========================================================================
    // Walk a pixel
    // ========================================================================

    println!("[2] Walking a red pixel...");

    session.auto_show(AutoShow::Off)?;
    session.clear_pixels()?;

    let length = session.get_pixel_count();
    for index in 0..length {
        if index > 0 {
            session.set_pixel(f64::from(index - 1), 0.0, 0.0, 0.0)?;
        }
        session.set_pixel(f64::from(index), 255.0, 0.0, 0.0)?;
        session.show()?;
        sleep(STEP).await;
    }

    println!("    ✓ Done\n");

    // ========================================================================
    // Half strip, shifting
    // ========================================================================

    println!("[3] Shifting within the first half...");

    let half = session.set_pixel_count(f64::from(length) / 2.0)?;
    println!("    Addressable pixels: {half}");

    session.set_pixels(0.0, 0.0, 0.0)?;
    session.set_pixel(0.0, 0.0, 255.0, 0.0)?;
    session.auto_show(AutoShow::On)?;
    for _ in 0..half {
        session.shift_pixels(ShiftDirection::Right)?;
        sleep(STEP).await;
    }

    println!("    ✓ Done\n");

    // ========================================================================
    // Fade out
    // ========================================================================

    println!("[4] Fading out...");

    session.set_pixel_count(f64::from(length))?;
    session.set_pixels(255.0, 255.0, 255.0)?;
    for _ in 0..32 {
        session.dim(8.0)?;
        sleep(STEP).await;
    }

    println!("    ✓ Done\n");

    common::wait_for_exit(args.no_wait).await;

    session.disconnect();
    println!("=== Demo Complete ===");
    Ok(())
}
