//! Shared library build.
//!
//! Compiles the generated `main` package, together with the bindings it
//! imports, into a C shared library inside the compiled-output tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::builder::toolchain::Toolchain;
use crate::core::WorkspaceLayout;
use crate::util::process::ProcessBuilder;

/// Drives `go build -buildmode=c-shared`.
pub struct NativeBuilder<'a> {
    toolchain: &'a Toolchain,
    library_name: &'a str,
    gopath_mode: bool,
}

impl<'a> NativeBuilder<'a> {
    /// Create a new native builder.
    pub fn new(toolchain: &'a Toolchain, library_name: &'a str) -> Self {
        NativeBuilder {
            toolchain,
            library_name,
            gopath_mode: true,
        }
    }

    /// Build with `GO111MODULE=off` (needed for the relative import in `main`).
    pub fn with_gopath_mode(mut self, gopath_mode: bool) -> Self {
        self.gopath_mode = gopath_mode;
        self
    }

    /// The command that builds the library.
    pub fn command(&self, layout: &WorkspaceLayout) -> ProcessBuilder {
        let library = self.library_path(layout);
        let mut cmd = ProcessBuilder::new(&self.toolchain.go)
            .cwd(&layout.main_dir)
            .arg("build")
            .arg("-o")
            .arg(&library)
            .arg("-buildmode=c-shared")
            .arg(".");
        if self.gopath_mode {
            cmd = cmd.env("GO111MODULE", "off");
        }
        cmd
    }

    /// Path of the shared library produced by [`NativeBuilder::build`].
    pub fn library_path(&self, layout: &WorkspaceLayout) -> PathBuf {
        layout.class_dir.join(self.library_name)
    }

    /// Build the shared library and return its path.
    pub fn build(&self, layout: &WorkspaceLayout) -> Result<PathBuf> {
        tracing::info!("Compiling {}", self.library_name);

        self.command(layout)
            .exec_and_check()
            .context("failed to build the native library")?;

        Ok(self.library_path(layout))
    }
}
