//! Configure the synthesizer, read back its state, and stop it.
//!
//! Demonstrates the full command surface against a connected impedance
//! meter: a validated `synthesize` call, the five-field state readback,
//! and the fire-and-forget stop.
//!
//! # Requirements
//!
//! - The impedance meter connected via USB (enumerates as `/dev/ttyACM*`
//!   on Linux; adjust the port path for your system)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p synthlib --example synthesize
//! ```

use std::time::Duration;

use synthlib::{DacSynthBuilder, SerialTransport, SynthesisRequest, DEFAULT_BAUD_RATE};

/// Test tone parameters.
const FREQUENCY_HZ: f64 = 1000.0; // 1 kHz
const AMPLITUDE_V: f64 = 1.0; // well inside the 3.3 V reference
const DWELL_SECS: u64 = 5; // how long to leave the tone running

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let serial_port = "/dev/ttyACM0";

    println!("Connecting to synthesizer on {}...", serial_port);
    let transport = SerialTransport::open(serial_port, DEFAULT_BAUD_RATE).await?;
    let mut synth = DacSynthBuilder::new()
        .debug(true)
        .build_with_transport(Box::new(transport));

    let request = SynthesisRequest::new(FREQUENCY_HZ).with_amplitude(AMPLITUDE_V);
    println!(
        "Synthesizing {:.1} Hz sine at {:.2} V...",
        FREQUENCY_HZ, AMPLITUDE_V
    );
    synth.synthesize(&request).await?;

    let state = synth.get_state().await?;
    println!("Device reports: {state}");

    println!("Leaving the tone running for {DWELL_SECS} s...");
    tokio::time::sleep(Duration::from_secs(DWELL_SECS)).await;

    println!("Stopping.");
    synth.stop().await?;
    synth.close().await?;

    Ok(())
}
