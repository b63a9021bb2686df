//! The five phases composed into one synchronous offload invocation.

use std::path::Path;

use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::{self, DeviceArray, DeviceClass, ExecutionContext, KernelProgram};

/// Run the kernel at `kernel_path` (entry point `entry_point`) over `data`
/// in place, on a device of the requested class.
///
/// One work item is dispatched per element; the kernel receives the device
/// buffer as its sole argument:
///
/// ```text
/// __kernel void apply_kernel(__global float *data) {
///     size_t i = get_global_id(0);
///     data[i] = data[i] + data[i];
/// }
/// ```
///
/// The call is fully synchronous: it resolves a device, builds a context and
/// an in-order queue, compiles the kernel source, copies `data` in, runs the
/// kernel to completion, and copies the results back over `data`. Nothing is
/// cached between calls; two invocations with the same inputs each perform
/// the whole sequence independently.
///
/// An empty slice is a defined no-op: the function returns `Ok(())` without
/// resolving a device or touching the kernel file.
///
/// # Errors
///
/// Any phase failure aborts the remaining phases and surfaces one variant of
/// [`Error`](crate::error::Error); resources acquired before the failure are
/// released in reverse acquisition order on the way out. `data` is
/// guaranteed unmodified unless the final read-back phase was reached.
///
/// # Example
///
/// ```no_run
/// use oclr::prelude::*;
///
/// let mut data = vec![1.0f32, 2.0, 3.0, 4.0];
/// apply_in_place(&mut data, "kernels/double.cl", "apply_kernel", DeviceClass::Gpu)?;
/// assert_eq!(data, [2.0, 4.0, 6.0, 8.0]);
/// # Ok::<(), oclr::error::Error>(())
/// ```
pub fn apply_in_place<T: Element>(
    data: &mut [T],
    kernel_path: impl AsRef<Path>,
    entry_point: &str,
    class: DeviceClass,
) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    // Locals are declared in acquisition order; on any early return they
    // drop in reverse, releasing buffer, then kernel/program, then queue,
    // then context.
    let device = runtime::resolve(class)?;
    let ctx = ExecutionContext::create(device)?;
    let program = KernelProgram::load_and_build(&ctx, kernel_path.as_ref(), entry_point)?;

    let mut mirror = DeviceArray::<T>::allocate(&ctx, data.len())?;
    mirror.write_from(&ctx, data)?;

    runtime::launch(&ctx, &program, &mirror)?;

    mirror.read_into(&ctx, data)
}
