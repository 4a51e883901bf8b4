//! Transport trait for synthesizer communication.
//!
//! The [`Transport`] trait abstracts over the physical link to the
//! instrument. The real implementation lives in `synthlib-transport`
//! (USB virtual COM port via `tokio-serial`); `synthlib-test-harness`
//! provides an in-memory mock for deterministic protocol testing.
//!
//! The protocol engine in `synthlib-dacsynth` operates on a `Transport`
//! rather than directly on a serial port, so the same controller code
//! drives both real hardware and test doubles.

use async_trait::async_trait;

use crate::error::Result;

/// Asynchronous byte-level transport to the synthesizer.
///
/// The protocol above this trait is strictly half-duplex with at most one
/// outstanding query: the controller flushes stale input, writes one
/// command line, and (for queries) reads exactly one reply line. There is
/// no unsolicited traffic from the device.
///
/// Read operations block until the transport produces data or errors;
/// implementations may bound that wait with a configured timeout and
/// return [`Error::Timeout`](crate::error::Error::Timeout) when it expires.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Write raw bytes to the device.
    ///
    /// Implementations should not return until all bytes have been handed
    /// to the underlying transport (serial TX buffer flushed).
    async fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read bytes until `eol` is seen, returning the line including the
    /// terminator byte.
    ///
    /// Blocks until a terminated line is available or the transport errors.
    async fn read_line(&mut self, eol: u8) -> Result<Vec<u8>>;

    /// Read a single byte from the device.
    async fn read_byte(&mut self) -> Result<u8>;

    /// Discard any buffered, unread input.
    ///
    /// Called before each query so a stale byte is never attributed to the
    /// reply of the command about to be sent.
    async fn flush_input(&mut self) -> Result<()>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent operations should return
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
