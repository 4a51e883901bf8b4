//! Error types for synthlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. The variants form three inspectable
//! families that callers can branch on:
//!
//! - **Constraint**: [`Error::Constraint`], [`Error::InvalidParameter`] --
//!   the request was rejected before any byte touched the transport.
//! - **Transport**: [`Error::Transport`], [`Error::Io`],
//!   [`Error::ConnectionLost`], [`Error::NotConnected`], [`Error::Timeout`]
//!   -- the byte stream failed to write, flush, or produce data.
//! - **Protocol**: [`Error::Protocol`], [`Error::Reply`] -- the device's
//!   reply could not be framed or parsed as the expected type.

/// The error type for all synthlib operations.
///
/// No operation retries internally and no failure is swallowed; every
/// variant is surfaced directly to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested frequency/sample-count combination would drive the DAC
    /// faster than its conversion hardware allows.
    ///
    /// Detected and rejected before any command is sent.
    #[error(
        "DAC interval {interval:.3e} s is below the hardware minimum \
         {minimum:.3e} s; increase the frequency or reduce the sample count"
    )]
    Constraint {
        /// The per-sample interval the request would produce, in seconds.
        interval: f64,
        /// The minimum interval the DAC supports, in seconds.
        minimum: f64,
    },

    /// A request parameter was rejected before any I/O (non-positive or
    /// non-finite frequency, zero sample count).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A transport-level error (serial port open/configure failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (unterminated reply, non-UTF-8 or empty line).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A query reply could not be parsed as the expected type.
    ///
    /// Carries the field being read and the raw reply text so the failure
    /// can be traced back to the offending exchange.
    #[error("malformed {field} reply: {raw:?}")]
    Reply {
        /// The state field whose query produced the reply.
        field: &'static str,
        /// The raw reply text as received, after EOL stripping.
        raw: String,
    },

    /// Timed out waiting for the device.
    ///
    /// Only produced when the transport was opened with a bounded read
    /// timeout; the default transport configuration blocks indefinitely.
    #[error("timeout waiting for reply")]
    Timeout,

    /// No connection to the device has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the device was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for the constraint family: the request was rejected
    /// before any transport I/O.
    pub fn is_constraint(&self) -> bool {
        matches!(self, Error::Constraint { .. } | Error::InvalidParameter(_))
    }

    /// Returns `true` for the transport family: the byte stream itself
    /// failed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_)
                | Error::Io(_)
                | Error::ConnectionLost
                | Error::NotConnected
                | Error::Timeout
        )
    }

    /// Returns `true` for the protocol family: bytes arrived but could not
    /// be framed or parsed.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_) | Error::Reply { .. })
    }
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_constraint() {
        let e = Error::Constraint {
            interval: 2e-6,
            minimum: 4e-6,
        };
        let msg = e.to_string();
        assert!(msg.contains("2.000e-6"));
        assert!(msg.contains("4.000e-6"));
        assert!(msg.contains("increase the frequency"));
    }

    #[test]
    fn error_display_invalid_parameter() {
        let e = Error::InvalidParameter("frequency must be positive".into());
        assert_eq!(e.to_string(), "invalid parameter: frequency must be positive");
    }

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_reply() {
        let e = Error::Reply {
            field: "frequency",
            raw: "garbage".into(),
        };
        assert_eq!(e.to_string(), "malformed frequency reply: \"garbage\"");
    }

    #[test]
    fn error_display_timeout() {
        let e = Error::Timeout;
        assert_eq!(e.to_string(), "timeout waiting for reply");
    }

    #[test]
    fn error_families_are_disjoint() {
        let errors = [
            Error::Constraint {
                interval: 1e-6,
                minimum: 4e-6,
            },
            Error::InvalidParameter("x".into()),
            Error::Transport("x".into()),
            Error::Protocol("x".into()),
            Error::Reply {
                field: "amplitude",
                raw: "x".into(),
            },
            Error::Timeout,
            Error::NotConnected,
            Error::ConnectionLost,
            Error::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe")),
        ];
        for e in &errors {
            let families = [e.is_constraint(), e.is_transport(), e.is_protocol()];
            assert_eq!(
                families.iter().filter(|&&f| f).count(),
                1,
                "error {e:?} must belong to exactly one family"
            );
        }
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
