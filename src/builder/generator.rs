//! Binding generator interface.
//!
//! The binding generator walks a package's types and emits source code. It
//! is an external collaborator: this module defines what it is given and
//! what it must return, one method per [`ArtifactKind`].

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::{ArtifactKind, ResolvedPackage};
use crate::util::process::{combined_output, ProcessBuilder};

/// Error produced while generating an artifact.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to bind {package} ({kind}): {message}")]
    Failed {
        package: String,
        kind: ArtifactKind,
        message: String,
    },

    #[error("failed to write {kind} for {package}")]
    Io {
        package: String,
        kind: ArtifactKind,
        #[source]
        source: std::io::Error,
    },
}

/// One file registered in the [`PositionTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFile {
    pub name: String,
    pub base: usize,
    pub size: usize,
}

/// Position table shared by every package in one build.
///
/// Each package's type information gets a disjoint range of positions, so a
/// position found while generating one package can be traced back to the
/// package that declared it.
#[derive(Debug, Clone)]
pub struct PositionTable {
    next: usize,
    files: Vec<PositionFile>,
}

impl Default for PositionTable {
    fn default() -> Self {
        PositionTable::new()
    }
}

impl PositionTable {
    pub fn new() -> Self {
        PositionTable {
            next: 1,
            files: Vec::new(),
        }
    }

    /// Register a file of `size` positions and return its base.
    ///
    /// Registering the same name again returns the existing base.
    pub fn add_file(&mut self, name: &str, size: usize) -> usize {
        if let Some(base) = self.base_of(name) {
            return base;
        }
        let base = self.next;
        self.files.push(PositionFile {
            name: name.to_string(),
            base,
            size,
        });
        self.next = base + size + 1;
        base
    }

    /// Base position of a registered file.
    pub fn base_of(&self, name: &str) -> Option<usize> {
        self.files.iter().find(|f| f.name == name).map(|f| f.base)
    }

    pub fn files(&self) -> &[PositionFile] {
        &self.files
    }
}

/// Everything the generator needs for one package.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig<'a> {
    /// Positions of every package in the build
    pub positions: &'a PositionTable,

    /// Package being generated
    pub package: &'a ResolvedPackage,

    /// All packages in the build, for cross-package references
    pub all: &'a [ResolvedPackage],

    /// Java package name override (`None` keeps the generator default)
    pub name_override: Option<&'a str>,
}

/// A binding generator.
pub trait Generator {
    /// Go source exporting the package's API to C.
    fn native_entry(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError>;

    /// Java class wrapping the package.
    fn foreign_class(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError>;

    /// JNI glue in C.
    fn native_glue(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError>;

    /// Header shared by the glue and the Go entry point.
    fn native_header(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError>;
}

/// Dispatch to the generator method for `kind`.
pub fn generate(
    generator: &dyn Generator,
    kind: ArtifactKind,
    out: &mut dyn Write,
    conf: &GeneratorConfig<'_>,
) -> Result<(), GenerateError> {
    match kind {
        ArtifactKind::NativeEntry => generator.native_entry(out, conf),
        ArtifactKind::ForeignClass => generator.foreign_class(out, conf),
        ArtifactKind::NativeGlue => generator.native_glue(out, conf),
        ArtifactKind::NativeHeader => generator.native_header(out, conf),
    }
}

/// Generator backed by an external executable.
///
/// The executable is run as
/// `<program> -lang=<go|java|c|h> -pkg=<import path> -export=<file>`
/// plus `-name=<override>` when set. The Go entry point additionally gets
/// `-fset-base=<n>` and `-deps=<import>=<export>,...`. Whatever the program
/// writes to stdout is the artifact.
#[derive(Debug, Clone)]
pub struct ExternalGenerator {
    program: PathBuf,
    cwd: PathBuf,
}

impl ExternalGenerator {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        ExternalGenerator {
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    fn lang(kind: ArtifactKind) -> &'static str {
        match kind {
            ArtifactKind::NativeEntry => "go",
            ArtifactKind::ForeignClass => "java",
            ArtifactKind::NativeGlue => "c",
            ArtifactKind::NativeHeader => "h",
        }
    }

    fn command(&self, kind: ArtifactKind, conf: &GeneratorConfig<'_>) -> ProcessBuilder {
        let pkg = conf.package;
        let mut cmd = ProcessBuilder::new(&self.program)
            .cwd(&self.cwd)
            .arg(format!("-lang={}", Self::lang(kind)))
            .arg(format!("-pkg={}", pkg.import_path()))
            .arg(format!("-export={}", pkg.types().export_file.display()));

        if let Some(name) = conf.name_override {
            cmd = cmd.arg(format!("-name={}", name));
        }
        cmd
    }

    fn run(
        &self,
        kind: ArtifactKind,
        cmd: ProcessBuilder,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        let package = conf.package.name().to_string();

        let output = cmd.exec().map_err(|e| GenerateError::Failed {
            package: package.clone(),
            kind,
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(GenerateError::Failed {
                package,
                kind,
                message: combined_output(&output),
            });
        }

        out.write_all(&output.stdout)
            .map_err(|source| GenerateError::Io {
                package,
                kind,
                source,
            })
    }

    fn run_simple(
        &self,
        kind: ArtifactKind,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        let cmd = self.command(kind, conf);
        self.run(kind, cmd, out, conf)
    }
}

impl Generator for ExternalGenerator {
    fn native_entry(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        let kind = ArtifactKind::NativeEntry;
        let base = conf
            .positions
            .base_of(conf.package.import_path())
            .unwrap_or(1);
        let deps = conf
            .all
            .iter()
            .map(|p| format!("{}={}", p.import_path(), p.types().export_file.display()))
            .collect::<Vec<_>>()
            .join(",");

        let cmd = self
            .command(kind, conf)
            .arg(format!("-fset-base={}", base))
            .arg(format!("-deps={}", deps));
        self.run(kind, cmd, out, conf)
    }

    fn foreign_class(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.run_simple(ArtifactKind::ForeignClass, out, conf)
    }

    fn native_glue(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.run_simple(ArtifactKind::NativeGlue, out, conf)
    }

    fn native_header(
        &self,
        out: &mut dyn Write,
        conf: &GeneratorConfig<'_>,
    ) -> Result<(), GenerateError> {
        self.run_simple(ArtifactKind::NativeHeader, out, conf)
    }
}
