//! Kernel dispatch: argument binding, work distribution, submission,
//! synchronization.
//!
//! The global work size is always exactly the element count - one work item
//! per element, so every element is processed exactly once. The queried
//! work-group size is only a hint for the local size; `local_work_size`
//! holds the policy for counts that do not divide evenly.

use std::ptr;

use super::buffer::DeviceArray;
use super::context::ExecutionContext;
use super::program::KernelProgram;
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Pick the local work size for a dispatch of `count` items given the
/// device's preferred work-group size for the kernel.
///
/// The preferred size is treated strictly as a hint:
/// - it is capped at `count`, so the local size never exceeds the global
///   size;
/// - if `count` is not a multiple of the capped hint, no local size is
///   chosen at all (`None`) and the runtime partitions the range itself,
///   which it must do with group sizes that divide the global size.
///
/// Passing the queried size unconditionally would make the runtime reject
/// any dispatch whose count is not a multiple of it
/// (`CL_INVALID_WORK_GROUP_SIZE`).
pub(crate) fn local_work_size(preferred: usize, count: usize) -> Option<usize> {
    let capped = preferred.min(count).max(1);
    if count % capped == 0 {
        Some(capped)
    } else {
        None
    }
}

/// Bind the device buffer as the kernel's sole argument, then submit a 1-D
/// range covering every element and block until the queue drains.
///
/// # Errors
///
/// [`Error::ArgumentBindFailed`], [`Error::WorkGroupQueryFailed`], or
/// [`Error::DispatchFailed`] (the latter covers both submission and the
/// final queue drain).
pub fn launch<T: Element>(
    ctx: &ExecutionContext,
    program: &KernelProgram,
    data: &DeviceArray<T>,
) -> Result<()> {
    let kernel = program.kernel();
    let mem = data.cl_mem();
    unsafe { kernel.set_arg(0, &mem) }.map_err(Error::ArgumentBindFailed)?;

    let preferred = kernel
        .get_work_group_size(ctx.device().id())
        .map_err(Error::WorkGroupQueryFailed)?;

    let count = data.len();
    let global: [usize; 1] = [count];
    let local: [usize; 1];
    let local_ptr = match local_work_size(preferred, count) {
        Some(size) => {
            local = [size];
            local.as_ptr()
        }
        None => ptr::null(),
    };

    unsafe {
        ctx.queue().enqueue_nd_range_kernel(
            kernel.get(),
            1,
            ptr::null(),
            global.as_ptr(),
            local_ptr,
            &[],
        )
    }
    .map_err(Error::DispatchFailed)?;

    // Enqueue-and-return is not enough: the read-back that follows must see
    // completed results, so drain the queue here.
    ctx.queue().finish().map_err(Error::DispatchFailed)?;

    Ok(())
}
