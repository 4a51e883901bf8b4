//! Shared data types: synthesis requests and device state snapshots.

use std::fmt;

use crate::config::{DacLimits, DAC_VOLTAGE_REF};
use crate::error::{Error, Result};

/// Waveform shape tag.
///
/// The shipped firmware only synthesizes sine waves and the wire protocol
/// carries no shape command, so this tag currently travels on the request
/// alone. It is kept open-ended rather than a fixed enum so future firmware
/// shapes need no API change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Waveform {
    /// Single-period sine wave (the only shape the current firmware renders).
    Sine,
    /// A shape identified by name, for firmware beyond the shipped sine
    /// synthesizer.
    Named(String),
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waveform::Sine => write!(f, "sine"),
            Waveform::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A validated request to synthesize a waveform.
///
/// Construct with [`SynthesisRequest::new`] and adjust with the `with_*`
/// methods; the derived DAC interval is checked against [`DacLimits`] by
/// the controller before anything is sent to the device.
///
/// # Example
///
/// ```
/// use synthlib_core::SynthesisRequest;
///
/// let request = SynthesisRequest::new(1000.0).with_amplitude(1.5);
/// assert_eq!(request.frequency, 1000.0);
/// assert_eq!(request.amplitude, 1.5);
/// assert_eq!(request.sample_count, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// Waveform frequency in hertz. Must be positive and finite.
    pub frequency: f64,
    /// Peak amplitude in volts. The controller does not range-check this;
    /// the device clamps it physically to its reference voltage.
    pub amplitude: f64,
    /// Samples per waveform period. When `None`, the controller derives the
    /// largest count that keeps the DAC interval at or above the hardware
    /// minimum, capped at the buffer depth.
    pub sample_count: Option<u32>,
    /// Waveform shape tag.
    pub waveform: Waveform,
}

impl SynthesisRequest {
    /// Create a request for a sine wave at `frequency` hertz with the
    /// default amplitude ([`DAC_VOLTAGE_REF`], 3.3 V) and a derived sample
    /// count.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            amplitude: DAC_VOLTAGE_REF,
            sample_count: None,
            waveform: Waveform::Sine,
        }
    }

    /// Set the peak amplitude in volts.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set an explicit sample count instead of deriving one.
    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    /// Set the waveform shape tag.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Resolve the effective sample count for this request and validate the
    /// resulting DAC interval against `limits`.
    ///
    /// When [`sample_count`](Self::sample_count) is absent, the derived
    /// count is `min(floor(1 / (frequency * min_interval)), max_sample_count)`,
    /// clamped to at least 1 -- the largest count that keeps the per-sample
    /// interval at or above the hardware minimum, capped at the DAC buffer
    /// depth.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if `frequency` is non-positive or
    ///   non-finite, or an explicit `sample_count` is zero.
    /// - [`Error::Constraint`] if `1 / (frequency * sample_count)` falls
    ///   below `limits.min_interval`. Nothing has been sent to the device
    ///   when this is returned.
    pub fn resolve_sample_count(&self, limits: &DacLimits) -> Result<u32> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "frequency must be positive and finite, got {}",
                self.frequency
            )));
        }

        let sample_count = match self.sample_count {
            Some(0) => {
                return Err(Error::InvalidParameter(
                    "sample count must be at least 1".into(),
                ));
            }
            Some(n) => n,
            None => {
                let max_for_interval = (1.0 / (self.frequency * limits.min_interval)) as u64;
                max_for_interval
                    .min(u64::from(limits.max_sample_count))
                    .max(1) as u32
            }
        };

        let interval = 1.0 / (self.frequency * f64::from(sample_count));
        if interval < limits.min_interval {
            return Err(Error::Constraint {
                interval,
                minimum: limits.min_interval,
            });
        }

        Ok(sample_count)
    }
}

/// A read-only snapshot of the synthesizer's configuration.
///
/// Produced by one `get_state()` round of five query exchanges. The fields
/// may reflect the device at five slightly different instants, and the
/// snapshot goes stale as soon as the next state-mutating command is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizerState {
    /// Waveform frequency in hertz.
    pub frequency: f64,
    /// Peak amplitude in volts.
    pub amplitude: f64,
    /// Samples per waveform period.
    pub sample_count: u32,
    /// Device-reported time between DAC samples, in seconds.
    pub interval: f64,
    /// Whether the synthesizer is currently generating output.
    pub is_running: bool,
}

impl fmt::Display for SynthesizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} Hz, {:.6} V, {} samples, {:.3e} s/sample, {}",
            self.frequency,
            self.amplitude,
            self.sample_count,
            self.interval,
            if self.is_running { "running" } else { "stopped" }
        )
    }
}
