use std::fmt;

use crate::error::{Result, TransportError};

/// Fixed service port of the AGV API server.
pub const DEFAULT_PORT: u16 = 17167;

/// Maximum host length accepted in an endpoint (DNS name limit).
const MAX_HOST_LEN: usize = 253;

/// A TCP endpoint of an API server, rendered as `tcp://<host>:<port>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Build an endpoint on the default service port.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::with_port(host, DEFAULT_PORT)
    }

    /// Build an endpoint on an explicit port.
    pub fn with_port(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();
        let trimmed = host.trim();

        if trimmed.is_empty() {
            return Err(TransportError::InvalidEndpoint {
                host,
                reason: "host must not be empty",
            });
        }
        if trimmed.len() > MAX_HOST_LEN {
            return Err(TransportError::InvalidEndpoint {
                host,
                reason: "host too long",
            });
        }
        if trimmed.contains("://") || trimmed.chars().any(char::is_whitespace) {
            return Err(TransportError::InvalidEndpoint {
                host,
                reason: "expected a bare host name or address",
            });
        }

        Ok(Self {
            host: trimmed.to_string(),
            port,
        })
    }

    /// Host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The transport URL, e.g. `tcp://192.168.1.10:17167`.
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') && !self.host.starts_with('[') {
            // Bare IPv6 literal.
            write!(f, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(f, "tcp://{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_url() {
        let endpoint = Endpoint::new("192.168.1.10").unwrap();
        assert_eq!(endpoint.url(), "tcp://192.168.1.10:17167");
        assert_eq!(endpoint.port(), DEFAULT_PORT);
    }

    #[test]
    fn explicit_port_and_trimmed_host() {
        let endpoint = Endpoint::with_port("  agv-01.local ", 5555).unwrap();
        assert_eq!(endpoint.host(), "agv-01.local");
        assert_eq!(endpoint.to_string(), "tcp://agv-01.local:5555");
    }

    #[test]
    fn ipv6_literal_is_bracketed() {
        let endpoint = Endpoint::new("::1").unwrap();
        assert_eq!(endpoint.url(), "tcp://[::1]:17167");
    }

    #[test]
    fn rejects_empty_host() {
        let result = Endpoint::new("   ");
        assert!(matches!(result, Err(TransportError::InvalidEndpoint { .. })));
    }

    #[test]
    fn rejects_full_url() {
        let result = Endpoint::new("tcp://10.0.0.1:17167");
        assert!(matches!(result, Err(TransportError::InvalidEndpoint { .. })));
    }

    #[test]
    fn rejects_embedded_whitespace() {
        let result = Endpoint::new("10.0.0.1 10.0.0.2");
        assert!(matches!(result, Err(TransportError::InvalidEndpoint { .. })));
    }
}
