use std::marker::PhantomData;
use std::ops::Range;

use crate::element::Element;
use crate::error::{FrameError, Result};
use crate::frame::PAYLOAD_SIZE;

/// Read-only typed view over a frame payload.
///
/// Index `i` addresses payload bytes `i * T::SIZE .. (i + 1) * T::SIZE`.
/// Views of different element types may alias the same bytes; choosing the
/// right view for a field is the caller's job.
#[derive(Clone, Copy)]
pub struct PayloadView<'a, T> {
    payload: &'a [u8],
    _element: PhantomData<T>,
}

impl<'a, T: Element> PayloadView<'a, T> {
    pub(crate) fn new(payload: &'a [u8]) -> Self {
        debug_assert_eq!(payload.len(), PAYLOAD_SIZE);
        Self {
            payload,
            _element: PhantomData,
        }
    }

    /// Number of addressable elements.
    pub fn len(&self) -> usize {
        capacity::<T>()
    }

    /// Always false: every payload holds at least eight elements.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read the element at `index`.
    pub fn get<I: TryInto<usize>>(&self, index: I) -> Result<T> {
        let range = byte_range::<T, I>(index)?;
        Ok(T::decode(&self.payload[range]))
    }

    /// Iterate over every element of the view.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let payload = self.payload;
        payload.chunks_exact(T::SIZE).map(T::decode)
    }
}

/// Mutable typed view over a frame payload.
pub struct PayloadViewMut<'a, T> {
    payload: &'a mut [u8],
    _element: PhantomData<T>,
}

impl<'a, T: Element> PayloadViewMut<'a, T> {
    pub(crate) fn new(payload: &'a mut [u8]) -> Self {
        debug_assert_eq!(payload.len(), PAYLOAD_SIZE);
        Self {
            payload,
            _element: PhantomData,
        }
    }

    /// Number of addressable elements.
    pub fn len(&self) -> usize {
        capacity::<T>()
    }

    /// Always false: every payload holds at least eight elements.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read the element at `index`.
    pub fn get<I: TryInto<usize>>(&self, index: I) -> Result<T> {
        let range = byte_range::<T, I>(index)?;
        Ok(T::decode(&self.payload[range]))
    }

    /// Write `value` at `index`.
    pub fn set<I: TryInto<usize>>(&mut self, index: I, value: T) -> Result<()> {
        let range = byte_range::<T, I>(index)?;
        value.encode(&mut self.payload[range]);
        Ok(())
    }
}

impl<T: Element> std::fmt::Debug for PayloadView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadView")
            .field("element", &T::NAME)
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Element> std::fmt::Debug for PayloadViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadViewMut")
            .field("element", &T::NAME)
            .field("len", &self.len())
            .finish()
    }
}

const fn capacity<T: Element>() -> usize {
    PAYLOAD_SIZE / T::SIZE
}

/// Payload byte range of element `index`, or the reason it has none.
fn byte_range<T: Element, I: TryInto<usize>>(index: I) -> Result<Range<usize>> {
    let index: usize = index
        .try_into()
        .map_err(|_| FrameError::InvalidIndexType)?;

    // Equivalent to (index + 1) * SIZE > PAYLOAD_SIZE without overflow.
    if index >= capacity::<T>() {
        return Err(FrameError::OutOfRange {
            index,
            element: T::NAME,
            capacity: capacity::<T>(),
        });
    }

    let start = index * T::SIZE;
    Ok(start..start + T::SIZE)
}
