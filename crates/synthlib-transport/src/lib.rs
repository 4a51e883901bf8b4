//! synthlib-transport: Transport implementations for synthlib.
//!
//! Provides [`SerialTransport`], the [`Transport`](synthlib_core::Transport)
//! implementation for the instrument's USB virtual COM port.

pub mod serial;

pub use serial::{SerialConfig, SerialTransport};
