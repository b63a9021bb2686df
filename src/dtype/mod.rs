//! Data type system for offloaded arrays
//!
//! This module provides the `DType` enum representing the element types a
//! kernel can be dispatched over, along with the [`Element`] trait that ties
//! Rust scalar types to their runtime descriptor.

mod element;

pub use element::Element;

use std::fmt;

/// Element types supported by the offload pipeline
///
/// The set is exactly the scalar types OpenCL C can spell without extension
/// pragmas, so every variant here can appear as the pointee type of a
/// `__global` kernel parameter on any conforming device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DType {
    /// 64-bit floating point
    F64,
    /// 32-bit floating point (most common)
    F32,
    /// 64-bit signed integer
    I64,
    /// 32-bit signed integer
    I32,
    /// 16-bit signed integer
    I16,
    /// 8-bit signed integer
    I8,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit unsigned integer
    U32,
    /// 16-bit unsigned integer
    U16,
    /// 8-bit unsigned integer
    U8,
}

impl DType {
    /// Size of one element in bytes
    ///
    /// Device buffers are sized as `count * size_in_bytes()`; this must agree
    /// with `mem::size_of` for the corresponding Rust type (checked by the
    /// `Element` unit tests).
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 | Self::U64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::I16 | Self::U16 => 2,
            Self::I8 | Self::U8 => 1,
        }
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
        }
    }

    /// The OpenCL C spelling of this type (e.g., "float", "ulong")
    ///
    /// Useful when generating kernel source that must match the element type
    /// of the host array it will be dispatched over.
    pub const fn opencl_name(self) -> &'static str {
        match self {
            Self::F64 => "double",
            Self::F32 => "float",
            Self::I64 => "long",
            Self::I32 => "int",
            Self::I16 => "short",
            Self::I8 => "char",
            Self::U64 => "ulong",
            Self::U32 => "uint",
            Self::U16 => "ushort",
            Self::U8 => "uchar",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
