/// Errors that can occur while building or accessing a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Raw bytes handed to the codec are not exactly one frame long.
    #[error("frame size mismatch ({actual} bytes, expected {expected})")]
    SizeMismatch { expected: usize, actual: usize },

    /// A typed payload index falls outside the 64-byte payload.
    #[error("index {index} out of range for {element} payload view ({capacity} elements)")]
    OutOfRange {
        index: usize,
        element: &'static str,
        capacity: usize,
    },

    /// A payload index that is not a non-negative integer.
    #[error("payload index must be a non-negative integer")]
    InvalidIndexType,
}

pub type Result<T> = std::result::Result<T, FrameError>;
