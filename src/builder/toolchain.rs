//! External toolchain discovery.
//!
//! Locates `go` and `javac` and derives the JNI include directories from
//! `JAVA_HOME`.

use std::path::{Path, PathBuf};

use crate::util::process::resolve_tool;
use crate::util::Config;

/// The external compilers used by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// The `go` tool
    pub go: PathBuf,

    /// The Java compiler
    pub javac: PathBuf,

    /// JDK installation
    pub java_home: PathBuf,
}

impl Toolchain {
    /// Resolve tools from configuration, falling back to `JAVA_HOME` and PATH.
    pub fn from_config(config: &Config, java_home: &Path) -> Self {
        let go = resolve_tool(config.toolchain.go.as_deref(), "go");

        let javac = match config.toolchain.javac.as_deref() {
            Some(path) => path.to_path_buf(),
            None => {
                let bundled = java_home
                    .join("bin")
                    .join(format!("javac{}", std::env::consts::EXE_SUFFIX));
                if bundled.is_file() {
                    bundled
                } else {
                    resolve_tool(None, "javac")
                }
            }
        };

        Toolchain {
            go,
            javac,
            java_home: java_home.to_path_buf(),
        }
    }

    /// The architecture-neutral and OS-specific JNI include directories.
    pub fn jni_include_dirs(&self) -> [PathBuf; 2] {
        let include = self.java_home.join("include");
        let os_include = include.join(jni_os_dir());
        [include, os_include]
    }
}

/// Name of the OS-specific JNI include directory for the host.
pub fn jni_os_dir() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}
