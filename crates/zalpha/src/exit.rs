use std::fmt;

use zalpha_client::{ClientError, ErrorKind};
use zalpha_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const DEVICE_REJECTED: i32 = 40;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    let code = match &err {
        ClientError::Transport(TransportError::InvalidEndpoint { .. }) => USAGE,
        err if err.is_timeout() => TIMEOUT,
        err => match err.kind() {
            ErrorKind::Transport => TRANSPORT_ERROR,
            ErrorKind::DeviceRejected => DEVICE_REJECTED,
            ErrorKind::Protocol | ErrorKind::UnknownResult => DATA_INVALID,
            ErrorKind::Unsupported => USAGE,
            ErrorKind::ConnectionState => INTERNAL,
        },
    };
    CliError::new(code, format!("{context}: {err}"))
}
