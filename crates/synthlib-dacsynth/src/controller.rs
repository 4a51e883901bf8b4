//! SynthesizerController -- the protocol engine for the DACSynth firmware.
//!
//! This module ties the line codec ([`protocol`](crate::protocol)) and the
//! command builders/parsers ([`commands`](crate::commands)) to a
//! [`Transport`] to produce a working synthesizer controller. It handles
//! command framing, reply stripping, and the flush-send-read exchange used
//! to pair queries with replies.
//!
//! The protocol has no request IDs and the device never emits unsolicited
//! lines, so exchange correctness rests on two rules the controller
//! enforces: stale input is flushed before every query, and at most one
//! query is outstanding at a time (`&mut self` makes overlap impossible
//! without external cloning, which the type does not support).

use tracing::debug;

use synthlib_core::config::ControllerConfig;
use synthlib_core::error::{Error, Result};
use synthlib_core::transport::Transport;
use synthlib_core::types::{SynthesisRequest, SynthesizerState};

use crate::commands;
use crate::protocol;

/// A connected DACSynth waveform synthesizer.
///
/// Owns its [`Transport`] exclusively for its whole lifetime and holds no
/// state between calls beyond the immutable [`ControllerConfig`]; every
/// operation is stateless with respect to prior calls except for the
/// device's own state.
///
/// All operations block the calling task until the transport completes or
/// errors. Nothing is retried: every transport or protocol failure is
/// surfaced immediately as a typed [`Error`]. Callers that need
/// multi-threaded access must serialize calls externally (e.g. a mutex
/// around the controller).
pub struct SynthesizerController {
    transport: Box<dyn Transport>,
    config: ControllerConfig,
}

impl SynthesizerController {
    /// Create a controller over an opened transport.
    ///
    /// See [`DacSynthBuilder`](crate::builder::DacSynthBuilder) for the
    /// fluent construction API.
    pub fn new(transport: Box<dyn Transport>, config: ControllerConfig) -> Self {
        Self { transport, config }
    }

    /// The controller's immutable configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Configure the synthesizer and start waveform generation.
    ///
    /// Derives the sample count when the request omits one, validates the
    /// resulting DAC interval, then sends exactly four commands in order:
    /// set frequency, set amplitude, set sample count, start. The order is
    /// load-bearing: the device compiles its DAC table from the parameters
    /// latched when `SYNTH.START` arrives, so START must come last.
    ///
    /// Generation continues on the device after this returns, until
    /// [`stop`](Self::stop) or a new `synthesize` call.
    ///
    /// # Errors
    ///
    /// - [`Error::Constraint`] / [`Error::InvalidParameter`] if the request
    ///   fails validation; nothing has been written to the transport.
    /// - Transport errors from any of the four sends. There is no rollback:
    ///   a mid-sequence failure leaves the device partially configured,
    ///   which the caller can observe via [`get_state`](Self::get_state).
    pub async fn synthesize(&mut self, request: &SynthesisRequest) -> Result<()> {
        let sample_count = request.resolve_sample_count(&self.config.limits)?;

        debug!(
            frequency = request.frequency,
            amplitude = request.amplitude,
            sample_count,
            waveform = %request.waveform,
            "Configuring synthesizer"
        );

        self.send_command(&commands::cmd_set_frequency(request.frequency))
            .await?;
        self.send_command(&commands::cmd_set_amplitude(request.amplitude))
            .await?;
        self.send_command(&commands::cmd_set_sample_count(sample_count))
            .await?;
        self.send_command(commands::cmd_start()).await
    }

    /// Stop waveform generation.
    ///
    /// Fire-and-forget: one write, no reply awaited, no validation.
    pub async fn stop(&mut self) -> Result<()> {
        self.send_command(commands::cmd_stop()).await
    }

    /// Read back the device's current configuration.
    ///
    /// Performs five query exchanges in fixed order: frequency, amplitude,
    /// sample count, interval, running flag. The snapshot is not atomic --
    /// the five fields may reflect device state at five slightly different
    /// instants if the device mutates state concurrently with the read.
    pub async fn get_state(&mut self) -> Result<SynthesizerState> {
        let frequency = self.frequency().await?;
        let amplitude = self.amplitude().await?;
        let sample_count = self.sample_count().await?;
        let interval = self.interval().await?;
        let is_running = self.is_running().await?;

        Ok(SynthesizerState {
            frequency,
            amplitude,
            sample_count,
            interval,
            is_running,
        })
    }

    /// Query the device's current frequency in hertz.
    pub async fn frequency(&mut self) -> Result<f64> {
        let raw = self.exchange(commands::cmd_read_frequency()).await?;
        commands::parse_f64_reply("frequency", &raw)
    }

    /// Query the device's current peak amplitude in volts.
    pub async fn amplitude(&mut self) -> Result<f64> {
        let raw = self.exchange(commands::cmd_read_amplitude()).await?;
        commands::parse_f64_reply("amplitude", &raw)
    }

    /// Query the device's current samples-per-period count.
    pub async fn sample_count(&mut self) -> Result<u32> {
        let raw = self.exchange(commands::cmd_read_sample_count()).await?;
        commands::parse_u32_reply("sample count", &raw)
    }

    /// Query the device-reported DAC interval in seconds.
    pub async fn interval(&mut self) -> Result<f64> {
        let raw = self.exchange(commands::cmd_read_interval()).await?;
        commands::parse_f64_reply("interval", &raw)
    }

    /// Query whether the synthesizer is currently generating output.
    pub async fn is_running(&mut self) -> Result<bool> {
        let raw = self.exchange(commands::cmd_read_is_running()).await?;
        commands::parse_bool_reply("running", &raw)
    }

    /// Read one raw byte from the transport.
    ///
    /// Diagnostic escape hatch for poking at a misbehaving link; the
    /// documented protocol never needs it.
    pub async fn read_byte(&mut self) -> Result<u8> {
        let byte = self.transport.read_byte().await?;
        if self.config.debug {
            debug!("<--- {byte:#04x}");
        }
        Ok(byte)
    }

    /// Close the underlying transport.
    pub async fn close(&mut self) -> Result<()> {
        self.transport.close().await
    }

    /// Encode `command` with the configured EOL and write it in one call.
    async fn send_command(&mut self, command: &str) -> Result<()> {
        let line = protocol::encode_line(command, &self.config.eol);
        if self.config.debug {
            debug!("---> {command}");
        }
        self.transport.write(&line).await
    }

    /// Block until a full reply line arrives, strip the terminator family,
    /// and return the text.
    ///
    /// # Errors
    ///
    /// [`Error::Protocol`] for a non-UTF-8 or empty reply; transport errors
    /// (including [`Error::Timeout`] on a bounded transport) as-is.
    async fn read_line(&mut self) -> Result<String> {
        let raw = self.transport.read_line(self.config.eol_byte()).await?;
        let text = protocol::strip_line(&raw, &self.config.eol)?;
        if text.is_empty() {
            return Err(Error::Protocol("empty reply line".into()));
        }
        if self.config.debug {
            debug!("<--- {text}");
        }
        Ok(text)
    }

    /// One query round trip: flush stale input, send the command, read
    /// exactly one reply line.
    ///
    /// The flush guarantees a leftover byte from a prior command is never
    /// attributed to this query's reply.
    async fn exchange(&mut self, command: &str) -> Result<String> {
        self.transport.flush_input().await?;
        self.send_command(command).await?;
        self.read_line().await
    }
}
