//! synthlib-core: Core traits, types, and error definitions for synthlib.
//!
//! This crate defines the device-agnostic abstractions shared by the
//! synthlib workspace: the byte-level [`Transport`] contract, the closed
//! [`Error`] enumeration, controller configuration, and the request/state
//! data model. Applications depend on these types without pulling in a
//! serial-port backend.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel
//! - [`SynthesisRequest`] / [`SynthesizerState`] -- waveform data model
//! - [`ControllerConfig`] / [`DacLimits`] -- immutable configuration
//! - [`Error`] / [`Result`] -- error handling

pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-export key types at crate root for ergonomic `use synthlib_core::*`.
pub use config::{ControllerConfig, DacLimits, DAC_VOLTAGE_REF};
pub use error::{Error, Result};
pub use transport::Transport;
pub use types::{SynthesisRequest, SynthesizerState, Waveform};
