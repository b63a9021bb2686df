//! Device resolution.
//!
//! `ComputeDevice` wraps an OpenCL device id and caches the properties the
//! rest of the pipeline needs, so later phases never re-query the driver for
//! static capabilities.

use std::fmt;

use opencl3::device::{
    get_all_devices, Device, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU,
};
use opencl3::types::{cl_device_id, cl_device_type};

use crate::error::{Error, Result};

/// Which class of compute device to resolve.
///
/// The pipeline resolves exactly one device of the requested class and never
/// falls back to the other class on its own; a caller that wants fallback
/// re-invokes with the other variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// A GPU device (`CL_DEVICE_TYPE_GPU`)
    Gpu,
    /// A CPU device (`CL_DEVICE_TYPE_CPU`)
    Cpu,
}

impl DeviceClass {
    pub(crate) const fn device_type(self) -> cl_device_type {
        match self {
            Self::Gpu => CL_DEVICE_TYPE_GPU,
            Self::Cpu => CL_DEVICE_TYPE_CPU,
        }
    }

    /// Lowercase name for display ("gpu" / "cpu")
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gpu => "gpu",
            Self::Cpu => "cpu",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved compute device.
///
/// Holds the selected device handle together with properties captured at
/// resolution time. The handle itself has no release obligation; device-side
/// resources created on it are owned by [`ExecutionContext`] and friends.
///
/// [`ExecutionContext`]: crate::runtime::ExecutionContext
pub struct ComputeDevice {
    device: Device,
    class: DeviceClass,
    name: String,
    max_work_group_size: usize,
}

// Manual impl because the opencl3 handle types don't implement `Debug`.
impl fmt::Debug for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeDevice")
            .field("class", &self.class)
            .field("name", &self.name)
            .field("max_work_group_size", &self.max_work_group_size)
            .finish_non_exhaustive()
    }
}

impl ComputeDevice {
    /// The raw device id, as required by context/build/query calls.
    #[inline]
    pub(crate) fn id(&self) -> cl_device_id {
        self.device.id()
    }

    /// Borrow the underlying opencl3 device.
    #[inline]
    pub(crate) fn inner(&self) -> &Device {
        &self.device
    }

    /// The class this device was resolved as.
    #[inline]
    pub fn class(&self) -> DeviceClass {
        self.class
    }

    /// Human-readable device name (e.g., "NVIDIA GeForce RTX 3080").
    ///
    /// Empty if the driver refused the query at resolution time.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum work-group size supported by the device.
    #[inline]
    pub fn max_work_group_size(&self) -> usize {
        self.max_work_group_size
    }
}

/// Resolve exactly one device of the requested class.
///
/// Returns the first device the platform reports for that class. Any driver
/// failure, and the empty-device case, map to [`Error::DeviceUnavailable`] -
/// both mean the same thing to the caller: nothing of that class can run the
/// kernel.
pub fn resolve(class: DeviceClass) -> Result<ComputeDevice> {
    let ids = get_all_devices(class.device_type())
        .map_err(|_| Error::DeviceUnavailable { class })?;
    let id = ids
        .first()
        .copied()
        .ok_or(Error::DeviceUnavailable { class })?;

    let device = Device::new(id);
    // Capability queries are best-effort at this point; a device that cannot
    // answer them will fail loudly in a later phase instead.
    let name = device.name().unwrap_or_default().trim().to_string();
    let max_work_group_size = device.max_work_group_size().unwrap_or(1);

    Ok(ComputeDevice {
        device,
        class,
        name,
        max_work_group_size,
    })
}

/// Lightweight probe: does any device of this class exist?
///
/// Never errors; used by tests and benchmarks to skip when the host has no
/// OpenCL runtime or no device of the class under test.
pub fn is_available(class: DeviceClass) -> bool {
    get_all_devices(class.device_type())
        .map(|ids| !ids.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_class_names() {
        assert_eq!(DeviceClass::Gpu.as_str(), "gpu");
        assert_eq!(DeviceClass::Cpu.as_str(), "cpu");
        assert_eq!(DeviceClass::Gpu.to_string(), "gpu");
    }

    #[test]
    fn test_device_class_maps_to_cl_type() {
        assert_eq!(DeviceClass::Gpu.device_type(), CL_DEVICE_TYPE_GPU);
        assert_eq!(DeviceClass::Cpu.device_type(), CL_DEVICE_TYPE_CPU);
    }

    #[test]
    fn test_resolve_reports_unavailable_class() {
        // Whichever class is absent on the test host must produce the
        // dedicated error, not a panic or a fallback to the other class.
        for class in [DeviceClass::Gpu, DeviceClass::Cpu] {
            if !is_available(class) {
                match resolve(class) {
                    Err(Error::DeviceUnavailable { class: reported }) => {
                        assert_eq!(reported, class)
                    }
                    other => panic!("expected DeviceUnavailable, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_resolved_device_has_sane_capabilities() {
        for class in [DeviceClass::Gpu, DeviceClass::Cpu] {
            if is_available(class) {
                let device = resolve(class).unwrap();
                assert_eq!(device.class(), class);
                assert!(device.max_work_group_size() >= 1);
            }
        }
    }
}
