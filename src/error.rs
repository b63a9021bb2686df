//! Error types for oclr

use std::path::PathBuf;

use opencl3::error_codes::ClError;
use thiserror::Error;

use crate::runtime::DeviceClass;

/// Result type alias using oclr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while offloading a kernel invocation
///
/// Every variant is terminal for the invocation that produced it: there is no
/// retry anywhere in the pipeline, because each failure mode is an environment
/// or configuration problem (missing device, bad kernel source, bad path), not
/// a transient one. Resources acquired before the failure are released by the
/// owning wrappers' `Drop` impls.
#[derive(Error, Debug)]
pub enum Error {
    /// No compute device of the requested class exists
    #[error("no {class} compute device is available")]
    DeviceUnavailable {
        /// The device class that was requested
        class: DeviceClass,
    },

    /// Context creation failed on a resolved device
    #[error("failed to create a compute context")]
    ContextCreationFailed(#[source] ClError),

    /// Command-queue creation failed on a live context
    #[error("failed to create an in-order command queue")]
    QueueCreationFailed(#[source] ClError),

    /// The kernel source file could not be opened or read
    #[error("cannot read kernel source `{}`", .path.display())]
    KernelFileNotFound {
        /// Path that was passed to the pipeline
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes were read than the file's reported size
    #[error("kernel source truncated: read {read} of {expected} bytes")]
    KernelReadIncomplete {
        /// Byte count reported by file metadata
        expected: usize,
        /// Byte count actually read
        read: usize,
    },

    /// The device compiler rejected the kernel source
    ///
    /// `log` holds the full build log for the target device. It is also
    /// written to standard diagnostic output at the point of failure, so
    /// callers that only observe the process externally still see it.
    #[error("kernel compilation failed:\n{log}")]
    CompilationFailed {
        /// Raw device-API error code from the build step
        code: i32,
        /// Complete compiler diagnostic log (untruncated)
        log: String,
    },

    /// The named entry point is absent from the compiled program
    #[error("kernel entry point `{name}` not found in compiled program")]
    EntryPointNotFound {
        /// The entry-point name that was requested
        name: String,
        /// Underlying device-API error
        #[source]
        source: ClError,
    },

    /// Device buffer allocation failed
    #[error("failed to allocate {bytes} bytes of device memory")]
    AllocationFailed {
        /// Requested allocation size in bytes
        bytes: usize,
        /// Underlying device-API error
        #[source]
        source: ClError,
    },

    /// The blocking host-to-device copy failed
    #[error("host to device transfer failed")]
    WriteTransferFailed(#[source] ClError),

    /// Binding the device buffer as the kernel argument failed
    #[error("failed to bind the device buffer as kernel argument 0")]
    ArgumentBindFailed(#[source] ClError),

    /// Querying the kernel's work-group size for the device failed
    #[error("work-group size query failed")]
    WorkGroupQueryFailed(#[source] ClError),

    /// Submitting the ND-range execution or draining the queue failed
    #[error("kernel dispatch failed")]
    DispatchFailed(#[source] ClError),

    /// The blocking device-to-host copy failed
    #[error("device to host transfer failed")]
    ReadTransferFailed(#[source] ClError),
}

/// Status code reserved for [`Error::KernelFileNotFound`]
pub const STATUS_KERNEL_FILE_NOT_FOUND: i32 = 1;

/// Status code reserved for [`Error::KernelReadIncomplete`]
pub const STATUS_KERNEL_READ_INCOMPLETE: i32 = 2;

impl Error {
    /// Nonzero status code for this failure, for callers that want a
    /// C-style status surface (`0` = success, nonzero = failure).
    ///
    /// Device-API failures report their raw (negative) OpenCL error code.
    /// Host-side file failures, which have no device-API code, use the
    /// crate-reserved positive [`STATUS_KERNEL_FILE_NOT_FOUND`] and
    /// [`STATUS_KERNEL_READ_INCOMPLETE`] values so that a failed invocation
    /// can never be mistaken for a successful one.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::DeviceUnavailable { .. } => -1, // CL_DEVICE_NOT_FOUND
            Self::KernelFileNotFound { .. } => STATUS_KERNEL_FILE_NOT_FOUND,
            Self::KernelReadIncomplete { .. } => STATUS_KERNEL_READ_INCOMPLETE,
            Self::CompilationFailed { code, .. } => *code,
            Self::ContextCreationFailed(e)
            | Self::QueueCreationFailed(e)
            | Self::EntryPointNotFound { source: e, .. }
            | Self::AllocationFailed { source: e, .. }
            | Self::WriteTransferFailed(e)
            | Self::ArgumentBindFailed(e)
            | Self::WorkGroupQueryFailed(e)
            | Self::DispatchFailed(e)
            | Self::ReadTransferFailed(e) => e.0,
        }
    }
}
