//! Package resolution.
//!
//! Builds the requested packages with `go install` in one invocation, then
//! asks `go list` for each package's name, directory and export data. Each
//! lookup is an independent `go list` call, so the result for one package
//! never depends on which packages were looked up before it.

pub mod errors;

pub use errors::ResolveError;

use std::path::PathBuf;

use serde::Deserialize;

use crate::core::{PackageDescriptor, ResolvedPackage, TypeInfo};
use crate::util::process::{combined_output, ProcessBuilder};

/// Subset of `go list -json` output used here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListedPackage {
    import_path: String,
    name: String,
    #[serde(default)]
    dir: PathBuf,
    #[serde(default)]
    export: Option<PathBuf>,
    #[serde(default)]
    error: Option<ListError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListError {
    err: String,
}

/// Resolves import paths to compiled type information using the `go` tool.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    go: PathBuf,
    cwd: PathBuf,
    gopath_mode: bool,
}

impl TypeResolver {
    /// Create a resolver running `go` in `cwd`, in GOPATH mode.
    pub fn new(go: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        TypeResolver {
            go: go.into(),
            cwd: cwd.into(),
            gopath_mode: true,
        }
    }

    /// Set whether every `go` command runs with `GO111MODULE=off`.
    pub fn with_gopath_mode(mut self, gopath_mode: bool) -> Self {
        self.gopath_mode = gopath_mode;
        self
    }

    /// Build all packages, then import each one.
    ///
    /// The result is in input order. The first failing lookup aborts the
    /// whole resolution.
    pub fn resolve(
        &self,
        packages: &[PackageDescriptor],
    ) -> Result<Vec<ResolvedPackage>, ResolveError> {
        if packages.is_empty() {
            return Err(ResolveError::NoPackages);
        }

        self.install(packages)?;

        packages.iter().map(|p| self.lookup(p)).collect()
    }

    /// Run `go install` for all packages at once.
    pub fn install(&self, packages: &[PackageDescriptor]) -> Result<(), ResolveError> {
        let import_paths: Vec<&str> = packages.iter().map(|p| p.import_path()).collect();
        tracing::info!("Installing {}", import_paths.join(" "));

        let cmd = self.go_command().arg("install").args(&import_paths);
        let output = self.run(&cmd)?;

        if !output.status.success() {
            return Err(ResolveError::InstallFailed {
                packages: import_paths.join(" "),
                output: combined_output(&output),
            });
        }
        Ok(())
    }

    /// Import the compiled type information of one package.
    pub fn lookup(&self, package: &PackageDescriptor) -> Result<ResolvedPackage, ResolveError> {
        let import_path = package.import_path();
        let cmd = self
            .go_command()
            .args(["list", "-export", "-json", import_path]);
        let output = self.run(&cmd)?;

        if !output.status.success() {
            return Err(ResolveError::LookupFailed {
                package: import_path.to_string(),
                output: combined_output(&output),
            });
        }

        let listed: ListedPackage =
            serde_json::from_slice(&output.stdout).map_err(|source| {
                ResolveError::BadMetadata {
                    package: import_path.to_string(),
                    source,
                }
            })?;

        if let Some(err) = listed.error {
            return Err(ResolveError::PackageError {
                package: import_path.to_string(),
                message: err.err,
            });
        }

        let export_file = listed
            .export
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ResolveError::MissingExportData {
                package: import_path.to_string(),
            })?;

        let size = std::fs::metadata(&export_file)
            .map_err(|_| ResolveError::MissingExportData {
                package: import_path.to_string(),
            })?
            .len();

        tracing::debug!(
            "resolved {} as `{}` ({} bytes of export data)",
            listed.import_path,
            listed.name,
            size
        );

        Ok(ResolvedPackage::new(
            package.clone(),
            listed.name,
            listed.dir,
            TypeInfo { export_file, size },
        ))
    }

    /// Locate the source directory of a package without building it.
    pub fn package_dir(&self, import_path: &str) -> Result<PathBuf, ResolveError> {
        let cmd = self
            .go_command()
            .args(["list", "-f", "{{.Dir}}", import_path]);
        let output = self.run(&cmd)?;

        let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() || dir.is_empty() {
            return Err(ResolveError::LookupFailed {
                package: import_path.to_string(),
                output: combined_output(&output),
            });
        }
        Ok(PathBuf::from(dir))
    }

    fn go_command(&self) -> ProcessBuilder {
        let cmd = ProcessBuilder::new(&self.go).cwd(&self.cwd);
        if self.gopath_mode {
            cmd.env("GO111MODULE", "off")
        } else {
            cmd
        }
    }

    fn run(&self, cmd: &ProcessBuilder) -> Result<std::process::Output, ResolveError> {
        cmd.exec().map_err(|e| ResolveError::Spawn {
            command: cmd.display_command(),
            message: format!("{:#}", e),
        })
    }
}
