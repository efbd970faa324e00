use crate::layout::{Command, ProtocolGeneration};

/// Errors that can occur in client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// `connect` called on a connected client.
    #[error("already connected to API server")]
    AlreadyConnected,

    /// A transaction was attempted without a connection.
    #[error("not connected to API server")]
    NotConnected,

    /// The reply violated the frame protocol.
    #[error("invalid reply: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// The device answered with a recognized error result code.
    #[error("request rejected: {0}")]
    DeviceRejected(RejectReason),

    /// The device answered with a result code the layout does not know.
    #[error("unknown result code {0:#06X}")]
    UnknownResult(u16),

    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] zalpha_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] zalpha_frame::FrameError),

    /// The command does not exist in the configured protocol generation.
    #[error("{command} is not available in protocol generation {generation}")]
    Unsupported {
        command: Command,
        generation: ProtocolGeneration,
    },
}

impl ClientError {
    /// Coarse classification used for exit codes and log fields.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::AlreadyConnected | ClientError::NotConnected => ErrorKind::ConnectionState,
            ClientError::Protocol(_) | ClientError::Frame(_) => ErrorKind::Protocol,
            ClientError::DeviceRejected(_) => ErrorKind::DeviceRejected,
            ClientError::UnknownResult(_) => ErrorKind::UnknownResult,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// Returns true if the transport gave up waiting for a reply.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(zalpha_transport::TransportError::Timeout(_))
        )
    }
}

/// Error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConnectionState,
    Protocol,
    DeviceRejected,
    UnknownResult,
    Transport,
    Unsupported,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ConnectionState => "connection_state",
            ErrorKind::Protocol => "protocol",
            ErrorKind::DeviceRejected => "device_rejected",
            ErrorKind::UnknownResult => "unknown_result",
            ErrorKind::Transport => "transport",
            ErrorKind::Unsupported => "unsupported",
        }
    }
}

/// Ways a reply can break the frame contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    /// The reply was not exactly one frame long.
    #[error("reply is {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    /// The reply echoed a different command than was sent.
    #[error("reply command {actual:#06X} does not match request {expected:#06X}")]
    CommandMismatch { expected: u16, actual: u16 },

    /// A text field was not valid UTF-8.
    #[error("malformed string in reply")]
    MalformedString,

    /// The action status byte is outside the known range.
    #[error("unknown action status {0}")]
    UnknownActionStatus(u8),

    /// The version string is not `major.minor[.patch]`.
    #[error("malformed version string '{0}'")]
    MalformedVersion(String),
}

/// Why the device refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// First-generation servers report a single generic error.
    Error,
    /// Invalid parameters in the API call.
    InvalidParameters,
    /// The target is busy.
    Busy,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            RejectReason::Error => "error reported by target",
            RejectReason::InvalidParameters => "invalid parameters in API call",
            RejectReason::Busy => "target is busy",
        };
        f.write_str(message)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use zalpha_transport::TransportError;

    use super::*;

    #[test]
    fn kinds_cover_every_variant() {
        assert_eq!(ClientError::NotConnected.kind(), ErrorKind::ConnectionState);
        assert_eq!(
            ClientError::Frame(zalpha_frame::FrameError::InvalidIndexType).kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            ClientError::DeviceRejected(RejectReason::Busy).kind(),
            ErrorKind::DeviceRejected
        );
        assert_eq!(ClientError::UnknownResult(0x1234).kind(), ErrorKind::UnknownResult);
        assert_eq!(
            ClientError::Unsupported {
                command: Command::Rotate,
                generation: ProtocolGeneration::V1,
            }
            .kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn timeout_is_detected() {
        let err: ClientError = TransportError::Timeout(Duration::from_millis(50)).into();
        assert!(err.is_timeout());
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!ClientError::NotConnected.is_timeout());
    }

    #[test]
    fn messages_name_codes_in_hex() {
        let err = ClientError::from(ProtocolViolation::CommandMismatch {
            expected: 0xFA12,
            actual: 0xFA13,
        });
        assert_eq!(
            err.to_string(),
            "invalid reply: reply command 0xFA13 does not match request 0xFA12"
        );
        assert_eq!(
            ClientError::UnknownResult(0xF9AB).to_string(),
            "unknown result code 0xF9AB"
        );
    }

    #[test]
    fn unsupported_names_command_and_generation() {
        let err = ClientError::Unsupported {
            command: Command::MoveBezier,
            generation: ProtocolGeneration::V1,
        };
        assert_eq!(
            err.to_string(),
            "MOVE_BEZIER is not available in protocol generation v1"
        );
    }
}
