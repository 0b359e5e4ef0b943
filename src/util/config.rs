//! Configuration file support for gojava.
//!
//! Configuration is read from up to three TOML files:
//! - Global: `~/.gojava/config.toml` - User-wide defaults
//! - Project: `.gojava/config.toml` - Overrides for the invoking directory
//! - Explicit: `--config <file>` (or `GOJAVA_CONFIG`)
//!
//! Later files take precedence over earlier ones.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Import path of the binding generator package whose install directory
/// holds the support files.
pub const DEFAULT_BIND_PACKAGE: &str = "github.com/sridharv/gomobile-java/bind";

/// Default external generator executable.
pub const DEFAULT_GENERATOR: &str = "gojava-bind";

/// Default name of the shared library placed in the archive.
pub const DEFAULT_LIBRARY_NAME: &str = "libgojava";

/// Default archive path, relative to the invoking directory.
pub const DEFAULT_ARCHIVE: &str = "libgojava.jar";

/// gojava configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool overrides
    pub toolchain: ToolchainConfig,

    /// Binding generator settings
    pub generator: GeneratorConfig,

    /// Shared library build settings
    pub native: NativeConfig,

    /// Archive settings
    pub output: OutputConfig,
}

/// Paths to the external compilers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Path to the `go` tool (default: found on PATH)
    pub go: Option<PathBuf>,

    /// Path to `javac` (default: `$JAVA_HOME/bin/javac`, then PATH)
    pub javac: Option<PathBuf>,
}

/// Binding generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generator executable
    pub program: Option<PathBuf>,

    /// Import path of the bind package (imported by the generated `main`)
    pub bind_package: Option<String>,

    /// Install directory of the bind package; looked up with `go list` when unset
    pub install_dir: Option<PathBuf>,
}

/// Shared library build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// File name of the shared library inside the native output directory
    pub library_name: Option<String>,

    /// Run every `go` command with `GO111MODULE=off` (default: true),
    /// required for the relative import in the generated `main` package
    pub gopath_mode: Option<bool>,
}

/// Archive settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default archive path when `-o` is not given
    pub archive: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.toolchain.go.is_some() {
            self.toolchain.go = other.toolchain.go;
        }
        if other.toolchain.javac.is_some() {
            self.toolchain.javac = other.toolchain.javac;
        }

        if other.generator.program.is_some() {
            self.generator.program = other.generator.program;
        }
        if other.generator.bind_package.is_some() {
            self.generator.bind_package = other.generator.bind_package;
        }
        if other.generator.install_dir.is_some() {
            self.generator.install_dir = other.generator.install_dir;
        }

        if other.native.library_name.is_some() {
            self.native.library_name = other.native.library_name;
        }
        if other.native.gopath_mode.is_some() {
            self.native.gopath_mode = other.native.gopath_mode;
        }

        if other.output.archive.is_some() {
            self.output.archive = other.output.archive;
        }
    }

    /// Generator executable.
    pub fn generator_program(&self) -> PathBuf {
        self.generator
            .program
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GENERATOR))
    }

    /// Import path of the bind package.
    pub fn bind_package(&self) -> &str {
        self.generator
            .bind_package
            .as_deref()
            .unwrap_or(DEFAULT_BIND_PACKAGE)
    }

    /// Shared library file name.
    pub fn library_name(&self) -> &str {
        self.native
            .library_name
            .as_deref()
            .unwrap_or(DEFAULT_LIBRARY_NAME)
    }

    /// Whether `go` runs in GOPATH mode.
    pub fn gopath_mode(&self) -> bool {
        self.native.gopath_mode.unwrap_or(true)
    }

    /// Archive path used when none is given on the command line.
    pub fn default_archive(&self) -> PathBuf {
        self.output
            .archive
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE))
    }
}

/// Load merged configuration.
///
/// Order of precedence (highest to lowest):
/// 1. Explicit config file
/// 2. Project config (.gojava/config.toml)
/// 3. Global config (~/.gojava/config.toml)
/// 4. Defaults
///
/// An explicit file that cannot be read is an error; the implicit locations
/// fall back to defaults with a warning.
pub fn load_config(
    global_path: Option<&Path>,
    project_path: &Path,
    explicit_path: Option<&Path>,
) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    if let Some(explicit) = explicit_path {
        config.merge(Config::load(explicit)?);
    }

    Ok(config)
}

/// Get the global gojava config directory (~/.gojava).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".gojava"))
}

/// Get the global config path (~/.gojava/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.gojava/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".gojava").join("config.toml")
}
