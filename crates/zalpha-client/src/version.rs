//! API server version reporting and compatibility.

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use zalpha_transport::Transport;

use crate::client::Client;
use crate::error::{ProtocolViolation, Result};
use crate::layout::Command;

/// Version of this library. A server is compatible when it shares the major
/// and minor numbers.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A `major.minor[.patch]` version as reported by an API server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion(semver::Version);

impl ServerVersion {
    /// Parse a version string. A missing patch number reads as 0.
    pub fn parse(text: &str) -> std::result::Result<Self, ProtocolViolation> {
        let trimmed = text.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let core_len = bare.find(['-', '+']).unwrap_or(bare.len());
        let padded = match bare[..core_len].matches('.').count() {
            1 => format!("{}.0{}", &bare[..core_len], &bare[core_len..]),
            _ => bare.to_string(),
        };
        semver::Version::parse(&padded)
            .map(Self)
            .map_err(|_| ProtocolViolation::MalformedVersion(text.to_string()))
    }

    /// This library's own version.
    pub fn library() -> std::result::Result<Self, ProtocolViolation> {
        Self::parse(LIBRARY_VERSION)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }

    /// Major and minor must match; patch and pre-release are ignored.
    pub fn is_compatible_with(&self, other: &ServerVersion) -> bool {
        self.0.major == other.0.major && self.0.minor == other.0.minor
    }
}

impl FromStr for ServerVersion {
    type Err = ProtocolViolation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns true if an API server reporting `server` can be driven by this
/// library.
pub fn version_compatible(server: &str) -> Result<bool> {
    let server = ServerVersion::parse(server)?;
    Ok(ServerVersion::library()?.is_compatible_with(&server))
}

impl<T: Transport> Client<T> {
    /// Query the API server version string.
    pub fn version_info(&mut self) -> Result<String> {
        let reply = self.transact(Command::VersionInfo, zalpha_frame::Frame::new())?;
        let text = std::str::from_utf8(reply.c_str()).map_err(|_| ProtocolViolation::MalformedString)?;
        Ok(text.to_string())
    }

    /// Fetch the server version and compare it with [`LIBRARY_VERSION`].
    pub fn check_compatibility(&mut self) -> Result<(ServerVersion, bool)> {
        let server = ServerVersion::parse(&self.version_info()?)?;
        let compatible = ServerVersion::library()?.is_compatible_with(&server);
        debug!(server = %server, library = LIBRARY_VERSION, compatible, "checked API server version");
        Ok((server, compatible))
    }
}
