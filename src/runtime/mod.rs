//! Device-facing phases of the offload pipeline
//!
//! Each phase is its own module, acquired strictly in order and released in
//! reverse by the owning wrappers' `Drop` impls:
//!
//! ```text
//! device    resolve one GPU or CPU device          (no release obligation)
//! context   context + in-order command queue       (queue drops before context)
//! program   run-time compile + entry-point extract (kernel drops before program)
//! buffer    device mirror of the host slice        (freed on drop)
//! dispatch  bind, size, submit, block on finish    (no owned state)
//! ```
//!
//! Nothing here is pooled or cached: every invocation pays full resolution
//! and compilation cost by design, and no state survives the call.

pub mod buffer;
pub mod context;
pub mod device;
pub mod dispatch;
pub mod program;

pub use buffer::DeviceArray;
pub use context::ExecutionContext;
pub use device::{is_available, resolve, ComputeDevice, DeviceClass};
pub use dispatch::launch;
pub use program::KernelProgram;
