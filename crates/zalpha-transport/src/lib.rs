//! Request/reply message transport for the Zalpha AGV API.
//!
//! The API server speaks a strict request/reply exchange: one message out,
//! exactly one message back, then the next request. This crate provides the
//! [`Transport`] seam the transaction engine drives, plus the ZeroMQ REQ
//! implementation used against real controllers.
//!
//! This is the lowest layer of the workspace. Frames are opaque byte
//! messages here; their layout lives in `zalpha-frame`.

pub mod endpoint;
pub mod error;
pub mod traits;

#[cfg(feature = "zmq")]
pub mod req;

pub use endpoint::{Endpoint, DEFAULT_PORT};
pub use error::{Result, TransportError};
pub use traits::{Transport, TransportConfig};

#[cfg(feature = "zmq")]
pub use req::ZmqTransport;
