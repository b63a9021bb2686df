//! Device buffer mirroring a host slice.
//!
//! One `DeviceArray` backs one invocation: allocated before the write,
//! written once, read once after dispatch, released by drop. All transfers
//! are blocking; the in-order queue plus `CL_BLOCKING` means a completed call
//! implies the data has actually moved.

use std::ptr;

use opencl3::memory::{Buffer, ClMem, CL_MEM_READ_WRITE};
use opencl3::types::{cl_mem, CL_BLOCKING};

use super::context::ExecutionContext;
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Device-resident memory mirroring a caller-owned host slice of `T`.
///
/// The byte size is always `count * size_of::<T>()`. The `Element` bound's
/// `Pod` requirement is what makes the typed enqueue calls sound: every bit
/// pattern of `T` is a valid value, so the device may scribble anything into
/// the buffer and the read-back is still defined.
pub struct DeviceArray<T: Element> {
    buffer: Buffer<T>,
    len: usize,
}

impl<T: Element> DeviceArray<T> {
    /// Allocate an uninitialized read/write device buffer for `count`
    /// elements of `T`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] with the requested byte size.
    pub fn allocate(ctx: &ExecutionContext, count: usize) -> Result<Self> {
        let bytes = count * T::DTYPE.size_in_bytes();
        let buffer = unsafe {
            Buffer::<T>::create(ctx.context(), CL_MEM_READ_WRITE, count, ptr::null_mut())
        }
        .map_err(|e| Error::AllocationFailed { bytes, source: e })?;

        Ok(Self { buffer, len: count })
    }

    /// Blocking host-to-device copy of `data` into this buffer.
    ///
    /// Must be called before any dispatch that reads the buffer; the caller's
    /// slice is only borrowed for the duration of the copy.
    pub fn write_from(&mut self, ctx: &ExecutionContext, data: &[T]) -> Result<()> {
        debug_assert_eq!(data.len(), self.len, "host slice does not match buffer");
        let event = unsafe {
            ctx.queue()
                .enqueue_write_buffer(&mut self.buffer, CL_BLOCKING, 0, data, &[])
        }
        .map_err(Error::WriteTransferFailed)?;
        event.wait().map_err(Error::WriteTransferFailed)?;
        Ok(())
    }

    /// Blocking device-to-host copy back into `data`, overwriting it in
    /// place. No new host allocation is made.
    pub fn read_into(&self, ctx: &ExecutionContext, data: &mut [T]) -> Result<()> {
        debug_assert_eq!(data.len(), self.len, "host slice does not match buffer");
        let event = unsafe {
            ctx.queue()
                .enqueue_read_buffer(&self.buffer, CL_BLOCKING, 0, data, &[])
        }
        .map_err(Error::ReadTransferFailed)?;
        event.wait().map_err(Error::ReadTransferFailed)?;
        Ok(())
    }

    /// Number of elements this buffer was sized for.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the buffer holds zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The raw memory handle, for kernel argument binding.
    #[inline]
    pub(crate) fn cl_mem(&self) -> cl_mem {
        self.buffer.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::device::{is_available, resolve, DeviceClass};

    fn setup() -> Option<ExecutionContext> {
        let class = [DeviceClass::Gpu, DeviceClass::Cpu]
            .into_iter()
            .find(|&c| is_available(c))?;
        let device = resolve(class).ok()?;
        ExecutionContext::create(device).ok()
    }

    #[test]
    fn test_write_then_read_roundtrips() {
        let Some(ctx) = setup() else {
            return;
        };

        let src: Vec<i32> = (0..257).collect();
        let mut mirror = DeviceArray::<i32>::allocate(&ctx, src.len()).unwrap();
        mirror.write_from(&ctx, &src).unwrap();

        let mut out = vec![0i32; src.len()];
        mirror.read_into(&ctx, &mut out).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_len_tracks_element_count() {
        let Some(ctx) = setup() else {
            return;
        };

        let mirror = DeviceArray::<f32>::allocate(&ctx, 16).unwrap();
        assert_eq!(mirror.len(), 16);
        assert!(!mirror.is_empty());
    }
}
