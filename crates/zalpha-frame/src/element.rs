//! Fixed-width payload element types.
//!
//! Every element is encoded little-endian with no padding; its size is the
//! stride of the payload view over it.

use bytes::{Buf, BufMut};

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value that can be projected onto the frame payload.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`,
/// `f32` and `f64`. The trait is sealed: the wire format defines exactly
/// these types.
pub trait Element: Copy + Send + Sync + 'static + sealed::Sealed {
    /// Encoded size in bytes.
    const SIZE: usize;
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Decode from the first `SIZE` bytes of `src`.
    fn decode(src: &[u8]) -> Self;

    /// Encode into the first `SIZE` bytes of `dst`.
    fn encode(self, dst: &mut [u8]);
}

macro_rules! impl_element {
    ($($ty:ty => $get:ident, $put:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();
                const NAME: &'static str = stringify!($ty);

                fn decode(mut src: &[u8]) -> Self {
                    src.$get()
                }

                fn encode(self, mut dst: &mut [u8]) {
                    dst.$put(self)
                }
            }
        )*
    };
}

impl_element! {
    u8 => get_u8, put_u8;
    i8 => get_i8, put_i8;
    u16 => get_u16_le, put_u16_le;
    i16 => get_i16_le, put_i16_le;
    u32 => get_u32_le, put_u32_le;
    i32 => get_i32_le, put_i32_le;
    u64 => get_u64_le, put_u64_le;
    i64 => get_i64_le, put_i64_le;
    f32 => get_f32_le, put_f32_le;
    f64 => get_f64_le, put_f64_le;
}
