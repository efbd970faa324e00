//! Client library for the Zalpha AGV API.
//!
//! The vehicle controller runs an API server that answers fixed-size
//! 72-byte request frames over a ZeroMQ request/reply socket. This crate
//! bundles the layers that speak that protocol.
//!
//! # Crate Structure
//!
//! - [`transport`]: request/reply message transport (ZeroMQ REQ)
//! - [`frame`]: the 72-byte frame codec and command code tables
//! - [`client`]: the transaction engine and typed operations
//!
//! ```no_run
//! use zalpha::client::Client;
//!
//! # fn main() -> zalpha::client::Result<()> {
//! let mut agv = Client::new()?;
//! agv.connect("192.168.1.10")?;
//! println!("battery at {:.0}%", agv.get_battery()?);
//! agv.disconnect();
//! # Ok(())
//! # }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use zalpha_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use zalpha_frame::*;
}

/// Re-export client types.
pub mod client {
    pub use zalpha_client::*;
}
