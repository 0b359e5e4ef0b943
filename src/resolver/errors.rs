//! Resolution error types.

use thiserror::Error;

/// Error while building or importing the requested packages.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no packages to bind")]
    NoPackages,

    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("`go install {packages}` failed:\n{output}")]
    InstallFailed { packages: String, output: String },

    #[error("failed to import `{package}`:\n{output}")]
    LookupFailed { package: String, output: String },

    #[error("malformed package metadata for `{package}`")]
    BadMetadata {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("package `{package}`: {message}")]
    PackageError { package: String, message: String },

    #[error("no export data for `{package}`")]
    MissingExportData { package: String },
}

impl ResolveError {
    /// Import path of the package the error refers to, if any.
    pub fn package(&self) -> Option<&str> {
        match self {
            ResolveError::LookupFailed { package, .. }
            | ResolveError::BadMetadata { package, .. }
            | ResolveError::PackageError { package, .. }
            | ResolveError::MissingExportData { package } => Some(package),
            ResolveError::NoPackages
            | ResolveError::Spawn { .. }
            | ResolveError::InstallFailed { .. } => None,
        }
    }
}
