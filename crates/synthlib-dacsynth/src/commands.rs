//! DACSynth command builders and reply parsers.
//!
//! This module provides functions to construct command text for the
//! synthesizer's operations (set frequency/amplitude/sample count,
//! start/stop, state queries) and to parse the corresponding replies.
//!
//! All functions are pure -- they produce or consume strings without
//! performing any I/O. The controller is responsible for framing the text
//! with the configured EOL, sending it over a transport, and feeding reply
//! lines back into the parsers.
//!
//! Floats are formatted with six decimal places, the precision the
//! firmware's ASCII parser expects.

use synthlib_core::error::{Error, Result};

// ---------------------------------------------------------------
// Command builders
// ---------------------------------------------------------------

/// Build a "set frequency" command (`SYNTH.FREQ <hz:.6>`).
pub fn cmd_set_frequency(freq_hz: f64) -> String {
    format!("SYNTH.FREQ {freq_hz:.6}")
}

/// Build a "set amplitude" command (`SYNTH.AMP <volts:.6>`).
pub fn cmd_set_amplitude(volts: f64) -> String {
    format!("SYNTH.AMP {volts:.6}")
}

/// Build a "set sample count" command (`SYNTH.SAMPNUM <n>`).
pub fn cmd_set_sample_count(sample_count: u32) -> String {
    format!("SYNTH.SAMPNUM {sample_count}")
}

/// Build a "start synthesis" command (`SYNTH.START`).
///
/// Must be sent after frequency, amplitude, and sample count; the device
/// compiles its DAC table from whatever parameters are latched when START
/// arrives.
pub fn cmd_start() -> &'static str {
    "SYNTH.START"
}

/// Build a "stop synthesis" command (`SYNTH.STOP`).
pub fn cmd_stop() -> &'static str {
    "SYNTH.STOP"
}

/// Build a "read frequency" query (`SYNTH.FREQ`). Reply: float text.
pub fn cmd_read_frequency() -> &'static str {
    "SYNTH.FREQ"
}

/// Build a "read amplitude" query (`SYNTH.AMP`). Reply: float text.
pub fn cmd_read_amplitude() -> &'static str {
    "SYNTH.AMP"
}

/// Build a "read sample count" query (`SYNTH.SAMPNUM`). Reply: integer text.
pub fn cmd_read_sample_count() -> &'static str {
    "SYNTH.SAMPNUM"
}

/// Build a "read DAC interval" query (`SYNTH.INTERVAL`). Reply: float text
/// in seconds.
pub fn cmd_read_interval() -> &'static str {
    "SYNTH.INTERVAL"
}

/// Build a "read running flag" query (`SYNTH.IS_RUNNING`). Reply: `"0"` or
/// `"1"`.
pub fn cmd_read_is_running() -> &'static str {
    "SYNTH.IS_RUNNING"
}

// ---------------------------------------------------------------
// Reply parsers
// ---------------------------------------------------------------

/// Parse a float reply.
///
/// # Arguments
///
/// * `field` - The state field being read, named in the error on failure.
/// * `raw` - The reply text after EOL stripping.
pub fn parse_f64_reply(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| Error::Reply {
        field,
        raw: raw.to_string(),
    })
}

/// Parse an unsigned integer reply.
pub fn parse_u32_reply(field: &'static str, raw: &str) -> Result<u32> {
    raw.trim().parse().map_err(|_| Error::Reply {
        field,
        raw: raw.to_string(),
    })
}

/// Parse a boolean reply encoded as `"0"` or `"1"`.
///
/// Any other text is a malformed reply, including `"true"`/`"false"` --
/// the firmware only ever prints the two digit forms.
pub fn parse_bool_reply(field: &'static str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(Error::Reply {
            field,
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Command builders
    // ---------------------------------------------------------------

    #[test]
    fn set_frequency_uses_six_decimal_places() {
        assert_eq!(cmd_set_frequency(1000.0), "SYNTH.FREQ 1000.000000");
        assert_eq!(cmd_set_frequency(97.3), "SYNTH.FREQ 97.300000");
    }

    #[test]
    fn set_amplitude_uses_six_decimal_places() {
        assert_eq!(cmd_set_amplitude(3.3), "SYNTH.AMP 3.300000");
        assert_eq!(cmd_set_amplitude(0.5), "SYNTH.AMP 0.500000");
    }

    #[test]
    fn set_sample_count_is_bare_integer() {
        assert_eq!(cmd_set_sample_count(250), "SYNTH.SAMPNUM 250");
        assert_eq!(cmd_set_sample_count(4096), "SYNTH.SAMPNUM 4096");
    }

    #[test]
    fn start_and_stop_take_no_argument() {
        assert_eq!(cmd_start(), "SYNTH.START");
        assert_eq!(cmd_stop(), "SYNTH.STOP");
    }

    #[test]
    fn queries_are_bare_verbs() {
        assert_eq!(cmd_read_frequency(), "SYNTH.FREQ");
        assert_eq!(cmd_read_amplitude(), "SYNTH.AMP");
        assert_eq!(cmd_read_sample_count(), "SYNTH.SAMPNUM");
        assert_eq!(cmd_read_interval(), "SYNTH.INTERVAL");
        assert_eq!(cmd_read_is_running(), "SYNTH.IS_RUNNING");
    }

    // ---------------------------------------------------------------
    // Reply parsers
    // ---------------------------------------------------------------

    #[test]
    fn parse_float_reply() {
        assert_eq!(parse_f64_reply("frequency", "1000.0").unwrap(), 1000.0);
        assert_eq!(parse_f64_reply("interval", "0.000004").unwrap(), 4e-6);
    }

    #[test]
    fn parse_float_reply_rejects_garbage() {
        let err = parse_f64_reply("frequency", "not-a-number").unwrap_err();
        match err {
            Error::Reply { field, raw } => {
                assert_eq!(field, "frequency");
                assert_eq!(raw, "not-a-number");
            }
            other => panic!("expected Reply, got {other:?}"),
        }
    }

    #[test]
    fn parse_integer_reply() {
        assert_eq!(parse_u32_reply("sample count", "250").unwrap(), 250);
        assert_eq!(parse_u32_reply("sample count", "4096").unwrap(), 4096);
    }

    #[test]
    fn parse_integer_reply_rejects_float_text() {
        let err = parse_u32_reply("sample count", "250.0").unwrap_err();
        assert!(matches!(err, Error::Reply { field: "sample count", .. }));
    }

    #[test]
    fn parse_bool_reply_accepts_digit_forms() {
        assert!(!parse_bool_reply("running", "0").unwrap());
        assert!(parse_bool_reply("running", "1").unwrap());
    }

    #[test]
    fn parse_bool_reply_rejects_word_forms() {
        for raw in ["true", "false", "2", ""] {
            let err = parse_bool_reply("running", raw).unwrap_err();
            assert!(matches!(err, Error::Reply { field: "running", .. }));
        }
    }
}
