//! Serial port transport for synthesizer communication.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait for the instrument's USB virtual COM port
//! (`/dev/ttyACM*` on Linux).
//!
//! The device enumerates as a USB CDC serial port, so the configured baud
//! rate is nominal; 9600 is used by convention. The link is always 8 data
//! bits, 1 stop bit, no parity, no flow control.
//!
//! # Example
//!
//! ```no_run
//! use synthlib_transport::SerialTransport;
//! use synthlib_core::transport::Transport;
//!
//! # async fn example() -> synthlib_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyACM0", 9600).await?;
//!
//! // Send a command line and read the reply.
//! transport.write(b"SYNTH.FREQ\n").await?;
//! let reply = transport.read_line(b'\n').await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::Duration;
use synthlib_core::error::{Error, Result};
use synthlib_core::transport::Transport;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};

/// Serial port configuration.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate. Nominal for USB CDC devices; 9600 by default.
    pub baud_rate: u32,
    /// Bound on how long a single `read_line`/`read_byte` call may block.
    ///
    /// `None` (the default) blocks indefinitely, matching the behavior of
    /// the instrument's reference driver. Set `Some(..)` when the caller
    /// needs bounded latency; expired reads return
    /// [`Error::Timeout`](synthlib_core::Error::Timeout).
    pub read_timeout: Option<Duration>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            read_timeout: None,
        }
    }
}

/// Serial port transport for synthesizer communication.
///
/// Implements the [`Transport`] trait over a USB virtual COM port.
pub struct SerialTransport {
    /// The underlying serial port stream.
    port: Option<SerialStream>,
    /// Port name for logging/debugging.
    port_name: String,
    /// Read deadline applied to each read call, if bounded.
    read_timeout: Option<Duration>,
}

impl SerialTransport {
    /// Open a serial port with the given baud rate and an unbounded read
    /// timeout.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g. "/dev/ttyACM0" on Linux, "COM4" on
    ///   Windows)
    /// * `baud_rate` - Nominal baud rate (9600 for this device family)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use synthlib_transport::SerialTransport;
    /// # async fn example() -> synthlib_core::Result<()> {
    /// let transport = SerialTransport::open("/dev/ttyACM0", 9600).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let config = SerialConfig {
            baud_rate,
            ..Default::default()
        };
        Self::open_with_config(port, config).await
    }

    /// Open a serial port with full configuration control.
    pub async fn open_with_config(port: &str, config: SerialConfig) -> Result<Self> {
        tracing::debug!(
            port = %port,
            baud_rate = config.baud_rate,
            read_timeout = ?config.read_timeout,
            "Opening serial port"
        );

        let serial_stream = tokio_serial::new(port, config.baud_rate)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("Failed to open serial port {}: {}", port, e))
            })?;

        tracing::info!(port = %port, baud_rate = config.baud_rate, "Serial port opened");

        Ok(Self {
            port: Some(serial_stream),
            port_name: port.to_string(),
            read_timeout: config.read_timeout,
        })
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    fn map_read_error(port_name: &str, e: std::io::Error) -> Error {
        tracing::error!(port = %port_name, error = %e, "Failed to read from serial port");
        if e.kind() == std::io::ErrorKind::BrokenPipe
            || e.kind() == std::io::ErrorKind::NotConnected
        {
            Error::ConnectionLost
        } else {
            Error::Io(e)
        }
    }

    /// Read one byte from `port`, treating EOF as a lost connection.
    async fn read_one(port: &mut SerialStream, port_name: &str) -> Result<u8> {
        let mut byte = [0u8; 1];
        let n = port
            .read(&mut byte)
            .await
            .map_err(|e| Self::map_read_error(port_name, e))?;
        if n == 0 {
            tracing::error!(port = %port_name, "Serial port returned EOF");
            return Err(Error::ConnectionLost);
        }
        Ok(byte[0])
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = ?data,
            "Writing data"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to write data");
            if e.kind() == std::io::ErrorKind::BrokenPipe
                || e.kind() == std::io::ErrorKind::NotConnected
            {
                Error::ConnectionLost
            } else {
                Error::Io(e)
            }
        })?;

        // Flush so the command leaves the TX buffer immediately.
        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush serial port");
            Error::Io(e)
        })?;

        Ok(())
    }

    async fn read_line(&mut self, eol: u8) -> Result<Vec<u8>> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        let port_name = &self.port_name;

        let read_to_eol = async {
            let mut line = Vec::new();
            loop {
                let byte = Self::read_one(port, port_name).await?;
                line.push(byte);
                if byte == eol {
                    return Ok::<Vec<u8>, Error>(line);
                }
            }
        };

        let line: Vec<u8> = match self.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, read_to_eol)
                .await
                .map_err(|_| {
                    tracing::trace!(port = %self.port_name, "Timeout waiting for line");
                    Error::Timeout
                })??,
            None => read_to_eol.await?,
        };

        tracing::trace!(
            port = %self.port_name,
            bytes = line.len(),
            data = ?line,
            "Read line"
        );
        Ok(line)
    }

    async fn read_byte(&mut self) -> Result<u8> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        let port_name = &self.port_name;

        let byte = match self.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, Self::read_one(port, port_name))
                .await
                .map_err(|_| Error::Timeout)??,
            None => Self::read_one(port, port_name).await?,
        };

        tracing::trace!(port = %self.port_name, byte, "Read byte");
        Ok(byte)
    }

    async fn flush_input(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(port = %self.port_name, "Discarding buffered input");
        port.clear(ClearBuffer::Input).map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to clear input buffer");
            Error::Transport(format!("Failed to clear input buffer: {e}"))
        })
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "Closing serial port");

            // Flush any pending output before closing.
            if let Err(e) = port.flush().await {
                tracing::warn!(
                    port = %self.port_name,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }

            // The port is dropped here, which closes it.
            tracing::info!(port = %self.port_name, "Serial port closed");
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.port.is_some() {
            tracing::debug!(port = %self.port_name, "SerialTransport dropped, closing port");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_config_default() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.read_timeout, None);
    }

    #[tokio::test]
    async fn open_nonexistent_port_is_transport_error() {
        let result = SerialTransport::open("/dev/ttyACM-does-not-exist", 9600).await;
        match result {
            Err(Error::Transport(msg)) => {
                assert!(msg.contains("/dev/ttyACM-does-not-exist"));
            }
            Err(other) => panic!("expected Transport error, got {other:?}"),
            Ok(_) => panic!("opening a nonexistent port should fail"),
        }
    }
}
