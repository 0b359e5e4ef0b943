//! Test utilities and mocks for gojava unit tests.
//!
//! Provides a recording [`Generator`] that never spawns anything, plus
//! fixtures (in [`fixtures`]) that lay out fake `go`, `javac` and generator
//! executables so the pipeline can run end to end without real toolchains.
//!
//! # Example
//!
//! ```rust,ignore
//! use gojava::test_support::{FakeToolchain, RecordingGenerator};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let tools = FakeToolchain::new(tmp.path());
//!     let generator = RecordingGenerator::new();
//!
//!     // Point a Config at `tools.config()` and run a stage...
//! }
//! ```

pub mod fixtures;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::builder::generator::{GenerateError, Generator, GeneratorConfig};
use crate::core::ArtifactKind;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Run `f` with a subscriber that records every event at debug level and
/// above; returns the result and the formatted log output.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One recorded native entry-point call: package, all import paths, and the
/// number of files registered in the position table at the time.
pub type EntryCall = (String, Vec<String>, usize);

/// Generator that writes a one-line marker per artifact and records calls.
///
/// Output for every artifact is `// <kind> <package name>\n`.
#[derive(Debug, Default)]
pub struct RecordingGenerator {
    calls: Mutex<Vec<(ArtifactKind, String)>>,
    entries: Mutex<Vec<EntryCall>>,
    fail: Option<(String, ArtifactKind)>,
}

impl RecordingGenerator {
    /// Create a generator that succeeds for every package.
    pub fn new() -> Self {
        RecordingGenerator::default()
    }

    /// Fail when generating `kind` for the package named `package`.
    pub fn failing_on(mut self, package: &str, kind: ArtifactKind) -> Self {
        self.fail = Some((package.to_string(), kind));
        self
    }

    /// All calls, in order.
    pub fn calls(&self) -> Vec<(ArtifactKind, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Native entry-point calls, in order.
    pub fn entry_calls(&self) -> Vec<EntryCall> {
        self.entries.lock().unwrap().clone()
    }

    fn emit(
        &self,
        kind: ArtifactKind,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        let name = conf.package.name().to_string();
        self.calls.lock().unwrap().push((kind, name.clone()));

        if let Some((fail_pkg, fail_kind)) = &self.fail {
            if *fail_pkg == name && *fail_kind == kind {
                return Err(GenerateError::Failed {
                    package: name,
                    kind,
                    message: "injected failure".to_string(),
                });
            }
        }

        writeln!(out, "// {} {}", kind, name).map_err(|source| GenerateError::Io {
            package: name,
            kind,
            source,
        })
    }
}

impl Generator for RecordingGenerator {
    fn native_entry(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.entries.lock().unwrap().push((
            conf.package.name().to_string(),
            conf.all.iter().map(|p| p.import_path().to_string()).collect(),
            conf.positions.files().len(),
        ));
        self.emit(ArtifactKind::NativeEntry, out, conf)
    }

    fn foreign_class(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.emit(ArtifactKind::ForeignClass, out, conf)
    }

    fn native_glue(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.emit(ArtifactKind::NativeGlue, out, conf)
    }

    fn native_header(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.emit(ArtifactKind::NativeHeader, out, conf)
    }
}
