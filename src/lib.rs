//! # oclr
//!
//! **Run-time compiled OpenCL offload for element-wise array transformations.**
//!
//! oclr takes a numeric slice, a `.cl` source file, and a kernel entry-point
//! name, and runs that kernel over the slice in place on an OpenCL device -
//! compiling the device code at run time and handling every step of the
//! offload for you.
//!
//! ## Why oclr?
//!
//! - **One call**: device resolution, context/queue setup, run-time kernel
//!   compilation, transfers, dispatch, and teardown behind a single function
//! - **Generic over element type**: the same pipeline instantiates for any
//!   OpenCL scalar type via the [`Element`](dtype::Element) trait
//! - **Fail fast, leak nothing**: every failure mode has its own error
//!   variant, and RAII releases device resources in reverse acquisition
//!   order on every exit path
//! - **Real compiler diagnostics**: build failures carry the device
//!   compiler's full log, untruncated
//!
//! ## Quick Start
//!
//! ```no_run
//! use oclr::prelude::*;
//!
//! // kernels/double.cl:
//! //   __kernel void apply_kernel(__global float *data) {
//! //       size_t i = get_global_id(0);
//! //       data[i] = data[i] + data[i];
//! //   }
//! let mut data = vec![1.0f32, 2.0, 3.0, 4.0];
//! apply_in_place(&mut data, "kernels/double.cl", "apply_kernel", DeviceClass::Gpu)?;
//! assert_eq!(data, [2.0, 4.0, 6.0, 8.0]);
//! # Ok::<(), oclr::error::Error>(())
//! ```
//!
//! ## Execution model
//!
//! Each invocation is a single synchronous pass through five phases, in
//! order: resolve device, build context + in-order queue, compile program
//! and extract the named kernel, mirror the host slice into a device buffer,
//! dispatch one work item per element and block until completion, then read
//! the results back over the caller's slice. No state survives the call -
//! repeated invocations each pay full resolution and compilation cost. Hosts
//! that need to amortize those costs should batch their work into fewer,
//! larger slices.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod pipeline;
pub mod runtime;

pub use pipeline::apply_in_place;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::apply_in_place;
    pub use crate::runtime::{is_available, DeviceClass};
}
