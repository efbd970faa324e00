use std::time::Duration;

use zalpha_transport::{TransportConfig, DEFAULT_PORT};

use crate::layout::ProtocolGeneration;

/// Client configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API server TCP port.
    pub port: u16,
    /// Protocol generation spoken by the server.
    pub generation: ProtocolGeneration,
    /// Socket-level settings.
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            generation: ProtocolGeneration::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_generation(mut self, generation: ProtocolGeneration) -> Self {
        self.generation = generation;
        self
    }

    /// Give up waiting for a reply after `timeout`.
    pub fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.transport.recv_timeout = Some(timeout);
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.transport.send_timeout = Some(timeout);
        self
    }

    /// Let a request follow a receive that failed or was interrupted.
    pub fn with_relaxed_requests(mut self) -> Self {
        self.transport.relaxed = true;
        self
    }
}
