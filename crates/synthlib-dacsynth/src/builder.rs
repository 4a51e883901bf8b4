//! DacSynthBuilder -- fluent builder for constructing
//! [`SynthesizerController`] instances.
//!
//! Separates configuration from construction so that callers can set the
//! terminator, debug echo, and DAC limits before handing over the
//! transport.
//!
//! # Example
//!
//! ```no_run
//! use synthlib_dacsynth::DacSynthBuilder;
//! use synthlib_transport::SerialTransport;
//!
//! # async fn example() -> synthlib_core::Result<()> {
//! let transport = SerialTransport::open("/dev/ttyACM0", 9600).await?;
//! let controller = DacSynthBuilder::new()
//!     .debug(true)
//!     .build_with_transport(Box::new(transport));
//! # Ok(())
//! # }
//! ```

use synthlib_core::config::{ControllerConfig, DacLimits};
use synthlib_core::transport::Transport;

use crate::controller::SynthesizerController;

/// Fluent builder for [`SynthesizerController`].
///
/// All configuration has sensible defaults ([`ControllerConfig::default`]),
/// so the simplest usage is
/// `DacSynthBuilder::new().build_with_transport(transport)`.
#[derive(Debug, Default)]
pub struct DacSynthBuilder {
    config: ControllerConfig,
}

impl DacSynthBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the end-of-line terminator (default: `\n`).
    pub fn eol(mut self, eol: &[u8]) -> Self {
        self.config.eol = eol.to_vec();
        self
    }

    /// Enable or disable the `--->`/`<---` wire echo on the `tracing`
    /// debug channel (default: off).
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Override the DAC limits used for sample-count derivation and
    /// interval validation (default: [`DacLimits::default`]).
    pub fn limits(mut self, limits: DacLimits) -> Self {
        self.config.limits = limits;
        self
    }

    /// Build a controller over an already-opened transport.
    pub fn build_with_transport(self, transport: Box<dyn Transport>) -> SynthesizerController {
        SynthesizerController::new(transport, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthlib_test_harness::MockTransport;

    #[test]
    fn builder_defaults_match_controller_config_default() {
        let controller =
            DacSynthBuilder::new().build_with_transport(Box::new(MockTransport::new()));
        assert_eq!(*controller.config(), ControllerConfig::default());
    }

    #[test]
    fn builder_applies_settings() {
        let limits = DacLimits {
            min_interval: 1e-5,
            max_sample_count: 512,
        };
        let controller = DacSynthBuilder::new()
            .eol(b"\r\n")
            .debug(true)
            .limits(limits)
            .build_with_transport(Box::new(MockTransport::new()));

        let config = controller.config();
        assert_eq!(config.eol, b"\r\n");
        assert!(config.debug);
        assert_eq!(config.limits, limits);
    }
}
