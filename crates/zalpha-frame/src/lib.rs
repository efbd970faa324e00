//! Fixed-size frame codec for the Zalpha AGV API.
//!
//! Every request and every reply is exactly 72 bytes:
//! - A 2-byte little-endian command code
//! - 6 reserved bytes, carried through untouched
//! - A 64-byte payload whose layout depends on the command
//!
//! Payload fields are reached through typed views that index the payload in
//! units of the element size, so each operation can project its own field
//! list onto the same bytes.

pub mod command;
pub mod element;
pub mod error;
pub mod frame;
pub mod view;

pub use command::{category, is_result_code, Category};
pub use element::Element;
pub use error::{FrameError, Result};
pub use frame::{Frame, FRAME_SIZE, HEADER_SIZE, PAYLOAD_SIZE, RESERVED_SIZE};
pub use view::{PayloadView, PayloadViewMut};
