//! Offload pipeline benchmark.
//!
//! Measures the full per-invocation cost (device resolution, compilation,
//! transfers, dispatch) against a host-side reference loop, which is exactly
//! the trade-off callers need to size their batches around. Skips cleanly
//! when the host has no OpenCL device.

use std::hint::black_box;
use std::io::Write;

use criterion::{criterion_group, criterion_main, Criterion};
use oclr::prelude::*;

const ENTRY: &str = "apply_kernel";

const DOUBLE_F32: &str = "__kernel void apply_kernel(__global float *data) {
    size_t i = get_global_id(0);
    data[i] = data[i] + data[i];
}
";

fn available_class() -> Option<DeviceClass> {
    [DeviceClass::Gpu, DeviceClass::Cpu]
        .into_iter()
        .find(|&class| is_available(class))
}

fn bench_pipeline(c: &mut Criterion) {
    let Some(class) = available_class() else {
        eprintln!("no OpenCL device available, skipping offload benchmarks");
        return;
    };

    let mut file = tempfile::NamedTempFile::new().expect("temp kernel file");
    file.write_all(DOUBLE_F32.as_bytes()).expect("write kernel");

    let mut group = c.benchmark_group("double_f32");
    for &n in &[1usize << 10, 1 << 16] {
        group.bench_function(format!("offload/{n}"), |b| {
            let mut data = vec![1.0f32; n];
            b.iter(|| {
                apply_in_place(black_box(&mut data), file.path(), ENTRY, class).unwrap();
            });
        });

        group.bench_function(format!("host/{n}"), |b| {
            let mut data = vec![1.0f32; n];
            b.iter(|| {
                for x in data.iter_mut() {
                    *x += *x;
                }
                black_box(&mut data);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
