//! synthlib-test-harness: Test doubles for synthlib protocol testing.
//!
//! Provides [`MockTransport`], an in-memory scripted
//! [`Transport`](synthlib_core::Transport) for exercising the protocol
//! engine without hardware.

pub mod mock_serial;

pub use mock_serial::MockTransport;
