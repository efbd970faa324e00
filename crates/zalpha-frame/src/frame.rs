use bytes::Bytes;

use crate::element::Element;
use crate::error::{FrameError, Result};
use crate::view::{PayloadView, PayloadViewMut};

/// Header: command (2) + reserved (6) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Payload bytes following the header.
pub const PAYLOAD_SIZE: usize = 64;

/// Total wire size of every request and reply.
pub const FRAME_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE;

/// Number of reserved header bytes after the command code.
pub const RESERVED_SIZE: usize = HEADER_SIZE - 2;

/// One fixed-size request or reply frame.
///
/// Wire format (all values little-endian):
/// ```text
/// ┌──────────────┬──────────────┬──────────────────────────┐
/// │ Command (2B) │ Reserved (6B)│ Payload (64B)            │
/// │ u16 LE       │ untouched    │ operation-defined fields │
/// └──────────────┴──────────────┴──────────────────────────┘
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; FRAME_SIZE],
}

impl Frame {
    /// Create a zeroed frame.
    pub fn new() -> Self {
        Self {
            buf: [0; FRAME_SIZE],
        }
    }

    /// Create a zeroed frame carrying `command`.
    pub fn with_command(command: u16) -> Self {
        let mut frame = Self::new();
        frame.set_command(command);
        frame
    }

    /// Copy a frame verbatim from raw wire bytes.
    ///
    /// Fails with [`FrameError::SizeMismatch`] unless `raw` is exactly
    /// [`FRAME_SIZE`] bytes long.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let buf: [u8; FRAME_SIZE] = raw.try_into().map_err(|_| FrameError::SizeMismatch {
            expected: FRAME_SIZE,
            actual: raw.len(),
        })?;
        Ok(Self { buf })
    }

    /// The command code at offset 0.
    pub fn command(&self) -> u16 {
        u16::from_le_bytes([self.buf[0], self.buf[1]])
    }

    /// Overwrite the command code at offset 0.
    pub fn set_command(&mut self, command: u16) {
        self.buf[..2].copy_from_slice(&command.to_le_bytes());
    }

    /// The reserved header bytes (offsets 2..8).
    pub fn reserved(&self) -> [u8; RESERVED_SIZE] {
        let mut reserved = [0; RESERVED_SIZE];
        reserved.copy_from_slice(&self.buf[2..HEADER_SIZE]);
        reserved
    }

    /// The 64 payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.buf[HEADER_SIZE..]
    }

    /// Typed read-only view over the payload.
    pub fn view<T: Element>(&self) -> PayloadView<'_, T> {
        PayloadView::new(&self.buf[HEADER_SIZE..])
    }

    /// Typed mutable view over the payload.
    pub fn view_mut<T: Element>(&mut self) -> PayloadViewMut<'_, T> {
        PayloadViewMut::new(&mut self.buf[HEADER_SIZE..])
    }

    /// Read payload element `index` of type `T`.
    pub fn read<T: Element, I: TryInto<usize>>(&self, index: I) -> Result<T> {
        self.view::<T>().get(index)
    }

    /// Write payload element `index` of type `T`.
    pub fn write<T: Element, I: TryInto<usize>>(&mut self, index: I, value: T) -> Result<()> {
        self.view_mut::<T>().set(index, value)
    }

    /// Payload bytes up to the first NUL terminator.
    ///
    /// The last payload byte is always treated as a terminator, so a payload
    /// without any NUL yields its first 63 bytes.
    pub fn c_str(&self) -> &[u8] {
        let text = &self.payload()[..PAYLOAD_SIZE - 1];
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        &text[..end]
    }

    /// The full 72-byte wire image.
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.buf
    }

    /// The full 72-byte wire image as shared bytes.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    fn try_from(raw: &[u8]) -> Result<Self> {
        Self::from_bytes(raw)
    }
}

impl From<Frame> for Bytes {
    fn from(frame: Frame) -> Self {
        frame.to_bytes()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self
            .payload()
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("Frame")
            .field("command", &format_args!("{:#06X}", self.command()))
            .field("reserved", &self.reserved())
            .field("payload", &&self.payload()[..used])
            .finish()
    }
}
