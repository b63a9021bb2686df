//! Program compilation: kernel source loading, device build, entry-point
//! extraction.
//!
//! Kernel source is ordinary text on disk, read whole (no streaming) and
//! handed to the device compiler at run time. Build diagnostics are fetched
//! in full on failure - they are embedded in the returned error and echoed to
//! standard diagnostic output, so both programmatic callers and humans
//! watching the process see them.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use opencl3::kernel::Kernel;
use opencl3::program::Program;

use super::context::ExecutionContext;
use crate::error::{Error, Result};

/// A program built for one device, with its extracted kernel entry point.
pub struct KernelProgram {
    // Kernel before program: fields drop top to bottom, releasing the kernel
    // before the program it was extracted from.
    kernel: Kernel,
    _program: Program,
    entry_point: String,
}

impl fmt::Debug for KernelProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelProgram")
            .field("entry_point", &self.entry_point)
            .finish_non_exhaustive()
    }
}

impl KernelProgram {
    /// Read kernel source from `path`, build it for the context's device, and
    /// extract the kernel named `entry_point`.
    ///
    /// Compilation failures are deterministic for a given source and device,
    /// so nothing here is retried.
    ///
    /// # Errors
    ///
    /// - [`Error::KernelFileNotFound`] - the file cannot be opened or read
    /// - [`Error::KernelReadIncomplete`] - fewer bytes read than the file's
    ///   reported size
    /// - [`Error::CompilationFailed`] - the device compiler rejected the
    ///   source; carries the full build log
    /// - [`Error::EntryPointNotFound`] - the named kernel is absent from the
    ///   built program
    pub fn load_and_build(
        ctx: &ExecutionContext,
        path: &Path,
        entry_point: &str,
    ) -> Result<Self> {
        let source = read_source(path)?;
        Self::build_from_source(ctx, &source, entry_point)
    }

    /// Build already-loaded source text; split out so tests can exercise the
    /// compile and extraction phases without a file.
    pub fn build_from_source(
        ctx: &ExecutionContext,
        source: &str,
        entry_point: &str,
    ) -> Result<Self> {
        let device_id = ctx.device().id();

        let mut program = Program::create_from_source(ctx.context(), source)
            .map_err(|e| Error::CompilationFailed {
                code: e.0,
                log: e.to_string(),
            })?;

        if let Err(e) = program.build(&[device_id], "") {
            let log = program
                .get_build_log(device_id)
                .unwrap_or_else(|_| String::from("<build log unavailable>"));
            eprintln!("kernel build failed on {}:", ctx.device().name());
            eprintln!("{log}");
            return Err(Error::CompilationFailed { code: e.0, log });
        }

        let kernel =
            Kernel::create(&program, entry_point).map_err(|e| Error::EntryPointNotFound {
                name: entry_point.to_string(),
                source: e,
            })?;

        Ok(Self {
            kernel,
            _program: program,
            entry_point: entry_point.to_string(),
        })
    }

    /// The extracted kernel, ready for argument binding and dispatch.
    #[inline]
    pub(crate) fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// The entry-point name this program was built around.
    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

/// Read the entire kernel source into a buffer sized from file metadata.
///
/// A successful read that still yields fewer bytes than the metadata reported
/// (the file shrank mid-read) is a distinct failure from an unopenable file.
/// Non-UTF-8 bytes are replaced rather than rejected; the device compiler is
/// the authority on whether the text is a valid kernel.
fn read_source(path: &Path) -> Result<String> {
    let file_error = |source| Error::KernelFileNotFound {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_error)?;
    let expected = file.metadata().map_err(file_error)?.len() as usize;

    let mut bytes = Vec::with_capacity(expected);
    file.read_to_end(&mut bytes).map_err(file_error)?;
    if bytes.len() < expected {
        return Err(Error::KernelReadIncomplete {
            expected,
            read: bytes.len(),
        });
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::device::{is_available, resolve, DeviceClass};
    use std::io::Write;

    fn setup() -> Option<ExecutionContext> {
        let class = [DeviceClass::Gpu, DeviceClass::Cpu]
            .into_iter()
            .find(|&c| is_available(c))?;
        let device = resolve(class).ok()?;
        ExecutionContext::create(device).ok()
    }

    #[test]
    fn test_build_and_extract_entry_point() {
        let Some(ctx) = setup() else {
            return;
        };

        let source = "__kernel void scale(__global float *data) { data[get_global_id(0)] *= 2.0f; }";
        let program = KernelProgram::build_from_source(&ctx, source, "scale").unwrap();
        assert_eq!(program.entry_point(), "scale");
    }

    #[test]
    fn test_read_source_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let text = "__kernel void noop(__global float *data) { }\n";
        file.write_all(text.as_bytes()).unwrap();

        let source = read_source(file.path()).unwrap();
        assert_eq!(source, text);
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/no/such/kernel.cl")).unwrap_err();
        match err {
            Error::KernelFileNotFound { path, .. } => {
                assert!(path.ends_with("kernel.cl"))
            }
            other => panic!("expected KernelFileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_read_source_replaces_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"// \xff\xfe comment\n").unwrap();

        let source = read_source(file.path()).unwrap();
        assert!(source.contains("comment"));
    }
}
