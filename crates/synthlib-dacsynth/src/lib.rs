//! synthlib-dacsynth: Protocol driver for the DACSynth waveform
//! synthesizer.
//!
//! The DACSynth firmware turns the instrument's 12-bit DAC into a
//! single-period waveform synthesizer: one period is stored as discrete
//! samples in a fixed buffer and replayed on a hardware timer. The host
//! controls it over a line-delimited ASCII protocol (`SYNTH.FREQ`,
//! `SYNTH.AMP`, `SYNTH.SAMPNUM`, `SYNTH.START`, `SYNTH.STOP`, plus
//! argument-less query forms).
//!
//! # Modules
//!
//! - [`protocol`] -- pure line codec: EOL framing and reply stripping
//! - [`commands`] -- pure command builders and typed reply parsers
//! - [`controller`] -- [`SynthesizerController`], the protocol engine
//! - [`builder`] -- [`DacSynthBuilder`] fluent construction
//!
//! The controller operates on any
//! [`Transport`](synthlib_core::Transport), so the same code drives the
//! real serial port and the mock transport in `synthlib-test-harness`.

pub mod builder;
pub mod commands;
pub mod controller;
pub mod protocol;

pub use builder::DacSynthBuilder;
pub use controller::SynthesizerController;
pub use protocol::{DEFAULT_BAUD_RATE, DEFAULT_EOL};
