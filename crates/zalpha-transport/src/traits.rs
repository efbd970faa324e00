use std::time::Duration;

use bytes::Bytes;

use crate::endpoint::Endpoint;
use crate::error::Result;

/// A strict request/reply message channel.
///
/// Implementations deliver whole messages: `send` transmits one request and
/// `recv` blocks until exactly one reply message is available. Callers must
/// alternate the two; a second `send` before `recv` is a usage error the
/// implementation may reject.
pub trait Transport {
    /// Bind the transport to a server endpoint.
    fn connect(&mut self, endpoint: &Endpoint) -> Result<()>;

    /// Release the binding to a server endpoint.
    fn disconnect(&mut self, endpoint: &Endpoint) -> Result<()>;

    /// Transmit one request message.
    fn send(&mut self, message: &[u8]) -> Result<()>;

    /// Block until one reply message arrives.
    fn recv(&mut self) -> Result<Bytes>;

    /// Transport name for diagnostics.
    fn name(&self) -> &'static str;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self, endpoint: &Endpoint) -> Result<()> {
        (**self).connect(endpoint)
    }

    fn disconnect(&mut self, endpoint: &Endpoint) -> Result<()> {
        (**self).disconnect(endpoint)
    }

    fn send(&mut self, message: &[u8]) -> Result<()> {
        (**self).send(message)
    }

    fn recv(&mut self) -> Result<Bytes> {
        (**self).recv()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Socket-level configuration for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Maximum time to block waiting for a reply. `None` blocks indefinitely.
    pub recv_timeout: Option<Duration>,
    /// Maximum time to block while queueing a request. `None` blocks indefinitely.
    pub send_timeout: Option<Duration>,
    /// How long unsent messages linger after disconnect.
    pub linger: Duration,
    /// Allow a new request after a failed receive, dropping any late reply.
    /// Always on when `recv_timeout` is set.
    pub relaxed: bool,
}

impl TransportConfig {
    /// Whether a request may follow a receive that never completed.
    pub fn is_relaxed(&self) -> bool {
        self.relaxed || self.recv_timeout.is_some()
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            recv_timeout: None,
            send_timeout: None,
            linger: Duration::ZERO,
            relaxed: false,
        }
    }
}
