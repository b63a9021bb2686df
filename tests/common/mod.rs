//! Common test utilities
#![allow(dead_code)]

use std::io::Write;

use oclr::dtype::Element;
use oclr::runtime::{is_available, DeviceClass};
use tempfile::NamedTempFile;

/// The entry-point name used by the generated kernels.
pub const ENTRY: &str = "apply_kernel";

/// Pick whichever device class is present on the test host, GPU first.
///
/// Returns `None` when the host has no OpenCL device at all; callers skip
/// in that case.
pub fn available_class() -> Option<DeviceClass> {
    [DeviceClass::Gpu, DeviceClass::Cpu]
        .into_iter()
        .find(|&class| is_available(class))
}

/// Write kernel source to a temp file; the file lives as long as the handle.
pub fn kernel_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp kernel file");
    file.write_all(source.as_bytes())
        .expect("write temp kernel file");
    file
}

/// Kernel that doubles each element, typed for `T`.
///
/// `x + x` rather than a literal `2` keeps the source valid for every
/// element type without formatting typed constants.
pub fn doubling_source<T: Element>() -> String {
    elementwise_source::<T>("v + v")
}

/// Kernel that squares each element, typed for `T`.
pub fn squaring_source<T: Element>() -> String {
    elementwise_source::<T>("v * v")
}

fn elementwise_source<T: Element>(expr: &str) -> String {
    let ty = T::DTYPE.opencl_name();
    format!(
        "__kernel void {ENTRY}(__global {ty} *data) {{\n    size_t i = get_global_id(0);\n    {ty} v = data[i];\n    data[i] = {expr};\n}}\n"
    )
}

/// A kernel body the device compiler must reject.
pub fn broken_source() -> String {
    format!("__kernel void {ENTRY}(__global float *data) {{ this is not C }}\n")
}

/// A valid kernel that does nothing, for entry-point-mismatch tests.
pub fn noop_source() -> String {
    format!("__kernel void {ENTRY}(__global float *data) {{ (void)data; }}\n")
}

/// Host-side reference doubling, mirroring what the device kernel computes.
pub fn double_on_host<T: Element>(data: &[T]) -> Vec<T> {
    data.iter().map(|&x| x + x).collect()
}

/// Host-side reference squaring.
pub fn square_on_host<T: Element>(data: &[T]) -> Vec<T> {
    data.iter().map(|&x| x * x).collect()
}
