//! DACSynth text-protocol line codec.
//!
//! The DACSynth firmware speaks a line-delimited ASCII protocol over its
//! USB serial port. Each command is a single line; queries are answered
//! with a single reply line.
//!
//! # Command format
//!
//! ```text
//! SYNTH.<VERB>[ <ARG>]<EOL>
//! ```
//!
//! - `VERB`: uppercase ASCII verb (`FREQ`, `AMP`, `SAMPNUM`, `START`,
//!   `STOP`, `INTERVAL`, `IS_RUNNING`).
//! - `ARG`: optional ASCII parameter, separated by a single space. A verb
//!   with an argument is a *set* command (no reply); the same verb without
//!   an argument is a *query* (exactly one reply line).
//! - `EOL`: the controller's configured terminator, `\n` by default.
//!
//! # Reply format
//!
//! One ASCII line per query: the bare value text (`1000.000000`, `250`,
//! `0` / `1`), terminated with the same EOL. The device may emit `\r\n`
//! regardless of the configured terminator, so reply stripping removes the
//! whole trailing terminator family, not just one byte.

use bytes::{BufMut, BytesMut};
use synthlib_core::error::{Error, Result};

/// Default end-of-line terminator.
pub const DEFAULT_EOL: &[u8] = b"\n";

/// Nominal baud rate for the device family's USB CDC serial port.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Encode a command line ready for transmission: the command text followed
/// by the EOL terminator.
///
/// The command text must not contain EOL characters; the builders in
/// [`commands`](crate::commands) never produce them.
///
/// # Example
///
/// ```
/// use synthlib_dacsynth::protocol::encode_line;
///
/// let line = encode_line("SYNTH.FREQ 1000.000000", b"\n");
/// assert_eq!(line, b"SYNTH.FREQ 1000.000000\n");
/// ```
pub fn encode_line(command: &str, eol: &[u8]) -> Vec<u8> {
    debug_assert!(
        !command.contains(['\r', '\n']),
        "command text must not embed EOL characters"
    );
    let mut buf = BytesMut::with_capacity(command.len() + eol.len());
    buf.put_slice(command.as_bytes());
    buf.put_slice(eol);
    buf.to_vec()
}

/// Strip a raw reply line down to its text.
///
/// Removes *all* trailing bytes belonging to the terminator family (the
/// configured `eol` bytes plus CR and LF), then validates the remainder as
/// UTF-8. Stripping is idempotent: `"1000.0\n"` and `"1000.0\r\n"` both
/// yield `"1000.0"`.
///
/// # Errors
///
/// [`Error::Protocol`] if the stripped line is not valid UTF-8.
///
/// # Example
///
/// ```
/// use synthlib_dacsynth::protocol::strip_line;
///
/// assert_eq!(strip_line(b"1000.0\n", b"\n").unwrap(), "1000.0");
/// assert_eq!(strip_line(b"1000.0\r\n", b"\n").unwrap(), "1000.0");
/// ```
pub fn strip_line(raw: &[u8], eol: &[u8]) -> Result<String> {
    let is_terminator = |b: u8| b == b'\r' || b == b'\n' || eol.contains(&b);

    let mut end = raw.len();
    while end > 0 && is_terminator(raw[end - 1]) {
        end -= 1;
    }

    let text = std::str::from_utf8(&raw[..end])
        .map_err(|_| Error::Protocol(format!("reply is not valid UTF-8: {:?}", &raw[..end])))?;
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Line encoding
    // ---------------------------------------------------------------

    #[test]
    fn encode_set_command() {
        let line = encode_line("SYNTH.FREQ 1000.000000", b"\n");
        assert_eq!(line, b"SYNTH.FREQ 1000.000000\n");
    }

    #[test]
    fn encode_query_command() {
        let line = encode_line("SYNTH.IS_RUNNING", DEFAULT_EOL);
        assert_eq!(line, b"SYNTH.IS_RUNNING\n");
    }

    #[test]
    fn encode_with_crlf_terminator() {
        let line = encode_line("SYNTH.STOP", b"\r\n");
        assert_eq!(line, b"SYNTH.STOP\r\n");
    }

    // ---------------------------------------------------------------
    // Reply stripping
    // ---------------------------------------------------------------

    #[test]
    fn strip_lf_terminated_reply() {
        assert_eq!(strip_line(b"1000.0\n", b"\n").unwrap(), "1000.0");
    }

    #[test]
    fn strip_crlf_terminated_reply() {
        assert_eq!(strip_line(b"1000.0\r\n", b"\n").unwrap(), "1000.0");
    }

    #[test]
    fn strip_repeated_terminators() {
        assert_eq!(strip_line(b"250\r\n\r\n", b"\n").unwrap(), "250");
    }

    #[test]
    fn strip_is_idempotent() {
        let once = strip_line(b"0.000004\r\n", b"\n").unwrap();
        let twice = strip_line(once.as_bytes(), b"\n").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn strip_custom_terminator() {
        assert_eq!(strip_line(b"1;\r\n", b";").unwrap(), "1");
    }

    #[test]
    fn strip_unterminated_reply_is_unchanged() {
        assert_eq!(strip_line(b"1000.0", b"\n").unwrap(), "1000.0");
    }

    #[test]
    fn strip_bare_terminator_yields_empty() {
        assert_eq!(strip_line(b"\r\n", b"\n").unwrap(), "");
    }

    #[test]
    fn strip_rejects_non_utf8() {
        let err = strip_line(&[0xFF, 0xFE, b'\n'], b"\n").unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
