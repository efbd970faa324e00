use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info};

use crate::endpoint::Endpoint;
use crate::error::{Result, TransportError};
use crate::traits::{Transport, TransportConfig};

/// ZeroMQ REQ socket transport.
///
/// The REQ socket enforces the send/receive alternation the API server
/// expects. When a receive timeout is configured, or relaxed mode is asked
/// for, the socket is switched to relaxed, correlated mode so that a reply
/// arriving after its receive failed is dropped instead of being paired with
/// the next request.
pub struct ZmqTransport {
    // Keep the context alive for as long as the socket.
    _context: zmq::Context,
    socket: zmq::Socket,
    config: TransportConfig,
    connected: Option<String>,
}

impl ZmqTransport {
    /// Create a REQ transport with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a REQ transport with explicit configuration.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::REQ)
            .map_err(|e| TransportError::Socket(e.to_string()))?;

        socket
            .set_rcvtimeo(timeout_millis(config.recv_timeout))
            .map_err(|e| TransportError::Socket(e.to_string()))?;
        socket
            .set_sndtimeo(timeout_millis(config.send_timeout))
            .map_err(|e| TransportError::Socket(e.to_string()))?;
        socket
            .set_linger(duration_millis(config.linger))
            .map_err(|e| TransportError::Socket(e.to_string()))?;

        if config.is_relaxed() {
            socket
                .set_req_correlate(true)
                .map_err(|e| TransportError::Socket(e.to_string()))?;
            socket
                .set_req_relaxed(true)
                .map_err(|e| TransportError::Socket(e.to_string()))?;
        }

        Ok(Self {
            _context: context,
            socket,
            config,
            connected: None,
        })
    }

    /// Current socket configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// The URL this transport is connected to, if any.
    pub fn connected_url(&self) -> Option<&str> {
        self.connected.as_deref()
    }
}

impl Transport for ZmqTransport {
    fn connect(&mut self, endpoint: &Endpoint) -> Result<()> {
        let url = endpoint.url();
        self.socket
            .connect(&url)
            .map_err(|e| TransportError::Connect {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;
        info!(%url, "connected REQ socket");
        self.connected = Some(url);
        Ok(())
    }

    fn disconnect(&mut self, endpoint: &Endpoint) -> Result<()> {
        let url = endpoint.url();
        let result = self
            .socket
            .disconnect(&url)
            .map_err(|e| TransportError::Disconnect {
                endpoint: url.clone(),
                reason: e.to_string(),
            });
        self.connected = None;
        debug!(%url, "disconnected REQ socket");
        result
    }

    fn send(&mut self, message: &[u8]) -> Result<()> {
        if self.connected.is_none() {
            return Err(TransportError::NotConnected);
        }
        self.socket.send(message, 0).map_err(|e| match e {
            zmq::Error::EAGAIN => {
                TransportError::Timeout(self.config.send_timeout.unwrap_or_default())
            }
            other => TransportError::Send(other.to_string()),
        })
    }

    fn recv(&mut self) -> Result<Bytes> {
        if self.connected.is_none() {
            return Err(TransportError::NotConnected);
        }
        match self.socket.recv_bytes(0) {
            Ok(message) => Ok(Bytes::from(message)),
            Err(zmq::Error::EAGAIN) => Err(TransportError::Timeout(
                self.config.recv_timeout.unwrap_or_default(),
            )),
            Err(other) => Err(TransportError::Receive(other.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "zmq-req"
    }
}

impl std::fmt::Debug for ZmqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZmqTransport")
            .field("connected", &self.connected)
            .field("config", &self.config)
            .finish()
    }
}

/// ZeroMQ timeout option value: -1 means block indefinitely.
fn timeout_millis(timeout: Option<Duration>) -> i32 {
    match timeout {
        Some(duration) => duration_millis(duration),
        None => -1,
    }
}

fn duration_millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}
