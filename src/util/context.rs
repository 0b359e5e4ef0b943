//! Global context for gojava operations.
//!
//! Captures the process environment once at startup: the invoking
//! directory, `JAVA_HOME`, and where scratch directories are created.
//! Later stages read these values instead of consulting the environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_path, project_config_path};

/// Environment variable naming the JDK installation.
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// Global context containing environment and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Directory the invocation started from
    cwd: PathBuf,

    /// JDK installation, if `JAVA_HOME` was set
    java_home: Option<PathBuf>,

    /// Parent directory for scratch workspaces (default: system temp dir)
    temp_root: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext from the process environment.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let java_home = std::env::var_os(JAVA_HOME_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(GlobalContext {
            cwd,
            java_home,
            temp_root: None,
        })
    }

    /// Create a GlobalContext with a specific invoking directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Override the JDK location (`None` behaves as if `JAVA_HOME` were unset).
    pub fn with_java_home(mut self, java_home: Option<PathBuf>) -> Self {
        self.java_home = java_home;
        self
    }

    /// Create scratch workspaces under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: PathBuf) -> Self {
        self.temp_root = Some(root);
        self
    }

    /// Get the invoking directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the JDK location, if known.
    pub fn java_home(&self) -> Option<&Path> {
        self.java_home.as_deref()
    }

    /// Directory under which scratch workspaces are created.
    pub fn temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Global config path (~/.gojava/config.toml), if a home directory exists.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        global_config_path()
    }

    /// Project config path (.gojava/config.toml under the invoking directory).
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Resolve a path given on the command line against the invoking directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
