//! # synthlib -- Waveform Synthesizer Control for the Impedance Meter
//!
//! `synthlib` is an asynchronous Rust library for controlling the
//! impedance meter's DACSynth waveform synthesizer over its USB serial
//! port. The device stores one waveform period as discrete DAC samples
//! and replays it on a hardware timer; the host sets frequency,
//! amplitude, and sample count over a line-delimited ASCII protocol.
//!
//! ## Quick Start
//!
//! ```no_run
//! use synthlib::{DacSynthBuilder, SerialTransport, SynthesisRequest, DEFAULT_BAUD_RATE};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = SerialTransport::open("/dev/ttyACM0", DEFAULT_BAUD_RATE).await?;
//!     let mut synth = DacSynthBuilder::new().build_with_transport(Box::new(transport));
//!
//!     // 1 kHz sine at the default 3.3 V amplitude; the sample count is
//!     // derived from the DAC's timing limits.
//!     synth.synthesize(&SynthesisRequest::new(1000.0)).await?;
//!
//!     let state = synth.get_state().await?;
//!     println!("synthesizer: {state}");
//!
//!     synth.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                   | Purpose                                      |
//! |-------------------------|----------------------------------------------|
//! | `synthlib-core`         | [`Transport`] trait, types, config, errors   |
//! | `synthlib-transport`    | Serial transport implementation              |
//! | `synthlib-dacsynth`     | DACSynth ASCII protocol driver               |
//! | `synthlib-test-harness` | Mock transport for protocol tests            |
//! | **`synthlib`**          | This facade crate -- re-exports everything   |
//!
//! ## Validation before I/O
//!
//! [`SynthesizerController::synthesize`] checks the derived DAC interval
//! `1 / (frequency * sample_count)` against the hardware minimum before
//! sending anything: a request the DAC cannot honor fails with
//! [`Error::Constraint`] and leaves the device untouched.
//!
//! ## Errors
//!
//! Every failure is a variant of the closed [`Error`] enumeration,
//! grouped into constraint, transport, and protocol families. Nothing is
//! retried internally.

pub use synthlib_core::*;

pub use synthlib_dacsynth::{
    DacSynthBuilder, SynthesizerController, DEFAULT_BAUD_RATE, DEFAULT_EOL,
};

pub use synthlib_transport::{SerialConfig, SerialTransport};

/// DACSynth protocol driver: codec, command builders, controller.
pub mod dacsynth {
    pub use synthlib_dacsynth::*;
}

/// Transport implementations.
pub mod transport {
    pub use synthlib_transport::*;
}
