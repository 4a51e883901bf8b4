//! Controller configuration and DAC hardware limits.
//!
//! Everything here is fixed at construction time and immutable for the
//! controller's lifetime. Tests inject alternate [`DacLimits`] instead of
//! touching shared state.

/// DAC reference voltage in volts.
///
/// Full-scale output of the synthesizer's 12-bit DAC; also the default
/// request amplitude.
pub const DAC_VOLTAGE_REF: f64 = 3.3;

/// Timing and depth limits of the synthesizer's DAC.
///
/// The firmware stores one waveform period as discrete samples in a fixed
/// buffer and replays it on a hardware timer. Both bounds come from that
/// design: the buffer holds at most [`max_sample_count`](Self::max_sample_count)
/// samples, and the timer cannot fire faster than once per
/// [`min_interval`](Self::min_interval).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DacLimits {
    /// Minimum time between successive DAC samples, in seconds.
    pub min_interval: f64,
    /// Maximum number of samples per waveform period (DAC buffer depth).
    pub max_sample_count: u32,
}

impl Default for DacLimits {
    fn default() -> Self {
        Self {
            min_interval: 4e-6,
            max_sample_count: 4096,
        }
    }
}

/// Immutable configuration for a [`SynthesizerController`].
///
/// [`SynthesizerController`]: https://docs.rs/synthlib-dacsynth
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// End-of-line terminator appended to every outbound command and
    /// expected on every inbound reply.
    pub eol: Vec<u8>,
    /// When enabled, every sent command is echoed to the `tracing` debug
    /// channel prefixed `--->` and every received line prefixed `<---`.
    /// Observability only; no behavioral effect.
    pub debug: bool,
    /// DAC limits used to derive and validate sample counts.
    pub limits: DacLimits,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            eol: b"\n".to_vec(),
            debug: false,
            limits: DacLimits::default(),
        }
    }
}

impl ControllerConfig {
    /// The final byte of the configured terminator, used to frame inbound
    /// line reads.
    pub fn eol_byte(&self) -> u8 {
        *self.eol.last().unwrap_or(&b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dac_limits_default() {
        let limits = DacLimits::default();
        assert_eq!(limits.min_interval, 4e-6);
        assert_eq!(limits.max_sample_count, 4096);
    }

    #[test]
    fn controller_config_default() {
        let config = ControllerConfig::default();
        assert_eq!(config.eol, b"\n");
        assert!(!config.debug);
        assert_eq!(config.limits, DacLimits::default());
        assert_eq!(config.eol_byte(), b'\n');
    }

    #[test]
    fn eol_byte_uses_last_byte_of_terminator() {
        let config = ControllerConfig {
            eol: b"\r\n".to_vec(),
            ..Default::default()
        };
        assert_eq!(config.eol_byte(), b'\n');
    }
}
