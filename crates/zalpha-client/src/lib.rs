//! Command/reply transaction engine for the Zalpha AGV API.
//!
//! This is the layer applications talk to. Connect a [`Client`] to an API
//! server, then call the typed operations: each one builds a fresh request
//! frame, performs exactly one request/reply exchange, validates the reply
//! and returns a typed value or a [`ClientError`].
//!
//! ```no_run
//! # fn main() -> zalpha_client::Result<()> {
//! let mut agv = zalpha_client::Client::new()?;
//! agv.connect("192.168.1.10")?;
//! agv.set_target_speed(0.5, 0.5)?;
//! let encoder = agv.get_encoder()?;
//! println!("left {} m, right {} m", encoder.left, encoder.right);
//! # Ok(())
//! # }
//! ```
//!
//! Two protocol generations exist in the field. The generation is chosen once
//! through [`ClientConfig::generation`] and fixes the command table, the
//! safety-flag layout and the recognized result codes for the life of the
//! client.

pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod motion;
pub mod power;
pub mod sensors;
pub mod types;
pub mod version;

#[cfg(test)]
mod mock;

pub use client::{Client, ConnectionState};
#[cfg(feature = "zmq")]
pub use client::ZmqClient;
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind, ProtocolViolation, RejectReason, Result};
pub use layout::{Command, FlagWidth, ProtocolGeneration, ProtocolLayout, ResultCode};
pub use types::{
    Acceleration, ActionStatus, BezierPath, ChargingState, EncoderAndSafety, EncoderCount,
    EncoderDistance, PlugMode, Point, SafetyCondition, SafetyFlags, WheelSpeeds,
};
pub use version::{version_compatible, ServerVersion, LIBRARY_VERSION};
