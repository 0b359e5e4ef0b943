//! Java compilation.

use anyhow::{Context, Result};

use crate::builder::toolchain::Toolchain;
use crate::core::{SourceList, WorkspaceLayout};
use crate::util::process::ProcessBuilder;

/// Drives `javac` over the assembled Java tree.
pub struct JavaCompiler<'a> {
    toolchain: &'a Toolchain,
}

impl<'a> JavaCompiler<'a> {
    pub fn new(toolchain: &'a Toolchain) -> Self {
        JavaCompiler { toolchain }
    }

    /// The `javac` invocation for `sources`.
    ///
    /// Classes go to the compiled-output root; the source path covers the
    /// parent of the Java tree so cross-file references resolve.
    pub fn command(&self, layout: &WorkspaceLayout, sources: &SourceList) -> ProcessBuilder {
        ProcessBuilder::new(&self.toolchain.javac)
            .cwd(&layout.java_dir)
            .arg("-d")
            .arg(&layout.jar_dir)
            .arg("-sourcepath")
            .arg(layout.java_dir.join(".."))
            .args(sources.files())
    }

    /// Compile every source into the compiled-output root.
    pub fn compile(&self, layout: &WorkspaceLayout, sources: &SourceList) -> Result<()> {
        tracing::info!("Compiling {} Java sources", sources.len());

        self.command(layout, sources)
            .exec_and_check()
            .context("failed to compile Java sources")?;
        Ok(())
    }
}
