//! gojava - build Java bindings for Go packages
//!
//! This crate provides the library behind the `gojava` command: package
//! resolution through the `go` tool, binding generation, native and Java
//! compilation, and jar packaging.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for gojava unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording generator and fake `go`,
/// `javac` and generator executables.
#[cfg(test)]
pub mod test_support;

pub use core::{
    package::{PackageDescriptor, ResolvedPackage},
    workspace::ScratchWorkspace,
};

pub use ops::{bind_to_jar, BindOptions, BindResult};
pub use resolver::TypeResolver;
pub use util::context::GlobalContext;
