//! Core data structures for gojava.
//!
//! - Package descriptors and their resolved type information
//! - The scratch workspace and its layout
//! - Generated artifacts and the Java source list

pub mod artifact;
pub mod package;
pub mod workspace;

pub use artifact::{ArtifactKind, ArtifactSet, SourceList};
pub use package::{PackageDescriptor, ResolvedPackage, TypeInfo};
pub use workspace::{ScratchWorkspace, WorkspaceError, WorkspaceLayout};
