//! Package descriptors.
//!
//! A [`PackageDescriptor`] is what the user asked for (an import path); a
//! [`ResolvedPackage`] is the same package after the Go toolchain has built
//! it and reported its name and compiled type information.

use std::fmt;
use std::path::{Path, PathBuf};

/// An input package, identified by import path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageDescriptor {
    import_path: String,
}

impl PackageDescriptor {
    /// Create a descriptor from an import path as given on the command line.
    pub fn new(import_path: impl Into<String>) -> Self {
        PackageDescriptor {
            import_path: import_path.into(),
        }
    }

    /// The package import path.
    pub fn import_path(&self) -> &str {
        &self.import_path
    }
}

impl fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.import_path)
    }
}

/// Compiled type information for a package.
///
/// This is the export data file written by the Go compiler; the binding
/// generator reads it to walk the package's types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Path to the export data
    pub export_file: PathBuf,

    /// Size of the export data in bytes
    pub size: u64,
}

/// A package whose compiled type information has been located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    descriptor: PackageDescriptor,
    name: String,
    dir: PathBuf,
    types: TypeInfo,
}

impl ResolvedPackage {
    /// Create a resolved package.
    pub fn new(
        descriptor: PackageDescriptor,
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        types: TypeInfo,
    ) -> Self {
        ResolvedPackage {
            descriptor,
            name: name.into(),
            dir: dir.into(),
            types,
        }
    }

    /// The descriptor this package was resolved from.
    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    /// The package import path.
    pub fn import_path(&self) -> &str {
        self.descriptor.import_path()
    }

    /// The package short name (the `package` clause).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source directory of the package.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compiled type information.
    pub fn types(&self) -> &TypeInfo {
        &self.types
    }

    /// Name of the Java class generated for this package.
    pub fn class_name(&self) -> String {
        capitalize(&self.name)
    }
}

/// Uppercase the first character of a package name.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
