//! Scratch workspace for a single build.
//!
//! A [`ScratchWorkspace`] owns a uniquely named temporary directory and the
//! fixed layout inside it. Dropping the workspace (or calling
//! [`ScratchWorkspace::teardown`]) removes the directory and restores the
//! working directory recorded when the build began. Teardown failures are
//! logged and never returned.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

use crate::util::context::JAVA_HOME_VAR;
use crate::util::GlobalContext;

/// Prefix of scratch directory names.
pub const SCRATCH_PREFIX: &str = "gojava";

/// Errors raised while starting a build.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("${var} not set")]
    MissingEnv { var: &'static str },

    #[error("failed to read current directory")]
    CurrentDir(#[source] io::Error),

    #[error("failed to create scratch directory under {}", .root.display())]
    CreateScratch {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fixed directory layout inside a scratch root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    /// Scratch root
    pub root: PathBuf,

    /// Go binding sources: entry points, C glue, headers, support files
    pub bind_dir: PathBuf,

    /// Directory of the generated `main` package
    pub main_dir: PathBuf,

    /// The generated `main.go`
    pub main_file: PathBuf,

    /// Java source tree
    pub java_dir: PathBuf,

    /// Compiled-output root; everything below it is archived
    pub jar_dir: PathBuf,

    /// Native output directory inside the compiled-output root
    pub class_dir: PathBuf,
}

impl WorkspaceLayout {
    /// Compute the layout for a scratch root.
    pub fn new(root: &Path) -> Self {
        let bind_dir = root.join("gojava_bind");
        let main_dir = bind_dir.join("main");
        let jar_dir = root.join("classes");

        WorkspaceLayout {
            root: root.to_path_buf(),
            main_file: main_dir.join("main.go"),
            main_dir,
            bind_dir,
            java_dir: root.join("src").join("go"),
            class_dir: jar_dir.join("go"),
            jar_dir,
        }
    }

    /// Create the directories that must exist before generation starts.
    pub fn create_dirs(&self) -> io::Result<()> {
        for dir in [&self.class_dir, &self.java_dir, &self.main_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// An isolated scratch directory tree for one build.
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: Option<TempDir>,
    layout: WorkspaceLayout,
    java_home: PathBuf,
    restore_dir: PathBuf,
}

impl ScratchWorkspace {
    /// Check preconditions and create the scratch tree.
    ///
    /// Fails before touching the filesystem when `JAVA_HOME` is unset.
    pub fn begin(ctx: &GlobalContext) -> Result<Self, WorkspaceError> {
        let java_home = ctx
            .java_home()
            .map(Path::to_path_buf)
            .ok_or(WorkspaceError::MissingEnv { var: JAVA_HOME_VAR })?;

        let restore_dir = std::env::current_dir().map_err(WorkspaceError::CurrentDir)?;

        let temp_root = ctx.temp_root();
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(&temp_root)
            .map_err(|source| WorkspaceError::CreateScratch {
                root: temp_root.clone(),
                source,
            })?;

        let layout = WorkspaceLayout::new(dir.path());
        layout
            .create_dirs()
            .map_err(|source| WorkspaceError::CreateScratch {
                root: temp_root,
                source,
            })?;

        tracing::debug!("scratch workspace at {}", layout.root.display());

        Ok(ScratchWorkspace {
            dir: Some(dir),
            layout,
            java_home,
            restore_dir,
        })
    }

    /// Scratch root.
    pub fn root(&self) -> &Path {
        &self.layout.root
    }

    /// Directory layout.
    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// JDK location the build was started with.
    pub fn java_home(&self) -> &Path {
        &self.java_home
    }

    /// Remove the scratch tree and restore the recorded working directory.
    pub fn teardown(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                tracing::warn!("failed to remove temp dir: {}: {}", path.display(), e);
            }
        }

        let unchanged = std::env::current_dir()
            .map(|cur| cur == self.restore_dir)
            .unwrap_or(false);
        if !unchanged {
            if let Err(e) = std::env::set_current_dir(&self.restore_dir) {
                tracing::warn!(
                    "failed to change to dir: {}: {}",
                    self.restore_dir.display(),
                    e
                );
            }
        }
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}
