use std::time::Duration;

/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The endpoint host is empty or contains characters a TCP endpoint cannot carry.
    #[error("invalid endpoint host '{host}': {reason}")]
    InvalidEndpoint { host: String, reason: &'static str },

    /// Failed to create the underlying socket.
    #[error("failed to create socket: {0}")]
    Socket(String),

    /// Failed to connect to the specified endpoint.
    #[error("failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    /// Failed to release the binding to the specified endpoint.
    #[error("failed to disconnect from {endpoint}: {reason}")]
    Disconnect { endpoint: String, reason: String },

    /// Sending a request message failed.
    #[error("send failed: {0}")]
    Send(String),

    /// Receiving a reply message failed.
    #[error("receive failed: {0}")]
    Receive(String),

    /// No reply arrived within the configured receive timeout.
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    /// The transport is not bound to any endpoint.
    #[error("transport not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, TransportError>;
