//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Mul};

/// Trait for types that can be elements of an offloaded array
///
/// This trait connects Rust's type system to the runtime dtype descriptor.
/// It is implemented for every scalar type the pipeline can dispatch over.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck); this is what
///   makes the typed host/device transfers sound
/// - `Add + Mul` - Host-side reference transforms (Output = Self)
/// - `Debug + PartialEq + PartialOrd` - Result comparison and reporting
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Mul<Output = Self>
    + std::fmt::Debug
    + PartialEq
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric handling
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident, $zero:expr, $one:expr;)*) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn zero() -> Self {
                    $zero
                }

                #[inline]
                fn one() -> Self {
                    $one
                }
            }
        )*
    };
}

impl_element! {
    f64 => F64, 0.0, 1.0;
    f32 => F32, 0.0, 1.0;
    i64 => I64, 0, 1;
    i32 => I32, 0, 1;
    i16 => I16, 0, 1;
    i8  => I8,  0, 1;
    u64 => U64, 0, 1;
    u32 => U32, 0, 1;
    u16 => U16, 0, 1;
    u8  => U8,  0, 1;
}
