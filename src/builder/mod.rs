//! Build stages.
//!
//! Each stage is a plain function or a small driver struct over an explicit
//! [`WorkspaceLayout`](crate::core::WorkspaceLayout); the sequencing lives in
//! [`ops::bind_to_jar`](crate::ops::bind_to_jar).

pub mod archive;
pub mod assemble;
pub mod bind;
pub mod generator;
pub mod javac;
pub mod native;
pub mod toolchain;

pub use archive::{create_archive, ArchiveSummary};
pub use assemble::{add_extra_files, create_support_files, SupportManifest};
pub use bind::{bind_packages, BindError, BindOutput};
pub use generator::{ExternalGenerator, GenerateError, Generator, GeneratorConfig, PositionTable};
pub use javac::JavaCompiler;
pub use native::NativeBuilder;
pub use toolchain::Toolchain;
