//! Execution context: a compute context plus one in-order command queue.

use std::fmt;

use opencl3::command_queue::CommandQueue;
use opencl3::context::Context;

use super::device::ComputeDevice;
use crate::error::{Error, Result};

/// A context and its single in-order command queue, bound to one device.
///
/// All transfers and dispatches for one invocation go through this pair.
/// The queue is FIFO: operations complete in submission order, which is what
/// lets the pipeline rely on blocking transfers plus one `finish` for
/// synchronization.
pub struct ExecutionContext {
    // Field order is load-bearing: fields drop top to bottom, so the queue is
    // released before the context it was created on.
    queue: CommandQueue,
    context: Context,
    device: ComputeDevice,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl ExecutionContext {
    /// Build a context and an in-order command queue on the resolved device.
    ///
    /// # Errors
    ///
    /// [`Error::ContextCreationFailed`] or [`Error::QueueCreationFailed`].
    /// If queue creation fails, the context created just before it is
    /// released on the way out (it is a local whose drop runs before the
    /// error propagates).
    pub fn create(device: ComputeDevice) -> Result<Self> {
        let context =
            Context::from_device(device.inner()).map_err(Error::ContextCreationFailed)?;

        // Properties 0 = in-order queue. The OpenCL 1.2 entry point is used
        // deliberately: the 2.0 variant is unavailable on macOS.
        #[allow(deprecated)]
        let queue = CommandQueue::create_default(&context, 0)
            .map_err(Error::QueueCreationFailed)?;

        Ok(Self {
            queue,
            context,
            device,
        })
    }

    /// The device this context is bound to.
    #[inline]
    pub fn device(&self) -> &ComputeDevice {
        &self.device
    }

    /// Borrow the underlying opencl3 context.
    #[inline]
    pub(crate) fn context(&self) -> &Context {
        &self.context
    }

    /// Borrow the in-order command queue.
    #[inline]
    pub(crate) fn queue(&self) -> &CommandQueue {
        &self.queue
    }
}
