//! Mock transport for deterministic testing of the protocol engine.
//!
//! [`MockTransport`] implements the [`Transport`] trait against an
//! in-memory input buffer and a queue of scripted reply lines. This lets
//! you test command encoding, exchange pairing, and reply parsing without
//! real hardware.
//!
//! The mock is cheaply cloneable and all clones share state, so a test can
//! keep a handle for scripting and inspection while the controller owns a
//! boxed clone:
//!
//! ```
//! use synthlib_test_harness::MockTransport;
//!
//! let mock = MockTransport::new();
//! mock.queue_reply(b"1000.0");
//! let boxed: Box<dyn synthlib_core::Transport> = Box::new(mock.clone());
//! // ... drive the controller over `boxed`, then assert on `mock.writes()`.
//! ```
//!
//! # Model
//!
//! - [`inject`](MockTransport::inject) plants raw bytes in the input
//!   buffer, as if they were already sitting unread in the OS buffer.
//!   `flush_input` discards exactly these.
//! - [`queue_reply`](MockTransport::queue_reply) scripts a future reply
//!   line. Scripted replies survive `flush_input` -- they model lines the
//!   device has not sent yet -- and enter the input buffer only when a
//!   read asks for data.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use synthlib_core::error::{Error, Result};
use synthlib_core::transport::Transport;

#[derive(Debug, Default)]
struct State {
    /// Bytes currently sitting unread in the simulated input buffer.
    input: VecDeque<u8>,
    /// Scripted reply lines not yet "sent" by the simulated device.
    replies: VecDeque<Vec<u8>>,
    /// Log of all `write` calls, one entry per call.
    writes: Vec<Vec<u8>>,
    /// Number of `flush_input` calls.
    flush_count: usize,
    /// Writes remaining before simulated failure, if armed.
    fail_writes_after: Option<usize>,
    connected: bool,
}

/// A mock [`Transport`] for testing the protocol engine without hardware.
///
/// All clones share the same state; see the module docs for the input
/// model.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            state: Arc::new(Mutex::new(State {
                connected: true,
                ..Default::default()
            })),
        }
    }

    /// Script a reply line: `text` plus a `\n` terminator.
    pub fn queue_reply(&self, text: &[u8]) {
        let mut line = text.to_vec();
        line.push(b'\n');
        self.state.lock().unwrap().replies.push_back(line);
    }

    /// Script a reply with explicit raw bytes, terminator included.
    pub fn queue_reply_raw(&self, bytes: &[u8]) {
        self.state.lock().unwrap().replies.push_back(bytes.to_vec());
    }

    /// Plant stale bytes directly in the input buffer.
    pub fn inject(&self, bytes: &[u8]) {
        self.state.lock().unwrap().input.extend(bytes.iter().copied());
    }

    /// All data written through this transport, one entry per `write` call.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Number of `flush_input` calls observed.
    pub fn flush_count(&self) -> usize {
        self.state.lock().unwrap().flush_count
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining_replies(&self) -> usize {
        self.state.lock().unwrap().replies.len()
    }

    /// Let the next `n` writes succeed, then fail every subsequent write
    /// with a transport error. Used to test mid-sequence failure handling.
    pub fn fail_writes_after(&self, n: usize) {
        self.state.lock().unwrap().fail_writes_after = Some(n);
    }

    /// Set the connected state. When `false`, all operations return
    /// [`Error::NotConnected`].
    pub fn set_connected(&self, connected: bool) {
        self.state.lock().unwrap().connected = connected;
    }

    /// Pull scripted replies into the input buffer until it holds data,
    /// returning `false` when both are exhausted.
    fn refill(state: &mut State) -> bool {
        while state.input.is_empty() {
            match state.replies.pop_front() {
                Some(line) => state.input.extend(line),
                None => return false,
            }
        }
        true
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Err(Error::NotConnected);
        }
        if let Some(remaining) = state.fail_writes_after {
            if remaining == 0 {
                return Err(Error::Transport("simulated write failure".into()));
            }
            state.fail_writes_after = Some(remaining - 1);
        }
        state.writes.push(data.to_vec());
        Ok(())
    }

    async fn read_line(&mut self, eol: u8) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Err(Error::NotConnected);
        }

        let mut line = Vec::new();
        loop {
            if !Self::refill(&mut state) {
                // A real transport would block here; the mock reports the
                // bounded-read outcome instead.
                return Err(Error::Timeout);
            }
            while let Some(byte) = state.input.pop_front() {
                line.push(byte);
                if byte == eol {
                    return Ok(line);
                }
            }
        }
    }

    async fn read_byte(&mut self) -> Result<u8> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Err(Error::NotConnected);
        }
        if !Self::refill(&mut state) {
            return Err(Error::Timeout);
        }
        Ok(state.input.pop_front().expect("refill guarantees a byte"))
    }

    async fn flush_input(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Err(Error::NotConnected);
        }
        state.flush_count += 1;
        state.input.clear();
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.connected = false;
        state.input.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }
}
