//! Implementation of `gojava build`.
//!
//! Runs the whole pipeline inside a scratch workspace: resolve the
//! packages, generate bindings, assemble the support tree, build the
//! shared library, compile the Java sources and package everything into a
//! jar. The scratch workspace is removed whether or not the build succeeds.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::builder::{
    add_extra_files, bind_packages, create_archive, create_support_files, ExternalGenerator,
    Generator, JavaCompiler, NativeBuilder, SupportManifest, Toolchain,
};
use crate::core::{PackageDescriptor, ScratchWorkspace, SourceList};
use crate::resolver::TypeResolver;
use crate::util::{Config, GlobalContext};

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Packages to bind, in order
    pub packages: Vec<PackageDescriptor>,

    /// Archive to write
    pub output: PathBuf,

    /// Extra Java sources to compile into the archive
    pub source_dir: Option<PathBuf>,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BindResult {
    /// Archive location
    pub archive: PathBuf,

    /// Archive entry names
    pub entries: Vec<String>,

    /// Number of generated artifacts
    pub artifacts: usize,
}

/// Bind `opts.packages` into a jar using the configured generator executable.
pub fn bind_to_jar(ctx: &GlobalContext, config: &Config, opts: &BindOptions) -> Result<BindResult> {
    let generator = ExternalGenerator::new(config.generator_program(), ctx.cwd());
    bind_to_jar_with(ctx, config, opts, &generator)
}

/// Bind `opts.packages` into a jar using `generator` for the bindings.
pub fn bind_to_jar_with(
    ctx: &GlobalContext,
    config: &Config,
    opts: &BindOptions,
    generator: &dyn Generator,
) -> Result<BindResult> {
    let workspace = ScratchWorkspace::begin(ctx)?;
    let result = run_pipeline(ctx, config, opts, generator, &workspace);
    workspace.teardown();
    result
}

fn run_pipeline(
    ctx: &GlobalContext,
    config: &Config,
    opts: &BindOptions,
    generator: &dyn Generator,
    workspace: &ScratchWorkspace,
) -> Result<BindResult> {
    let layout = workspace.layout();
    let toolchain = Toolchain::from_config(config, workspace.java_home());
    tracing::debug!("using go at {}", toolchain.go.display());
    tracing::debug!("using javac at {}", toolchain.javac.display());

    let resolver =
        TypeResolver::new(&toolchain.go, ctx.cwd()).with_gopath_mode(config.gopath_mode());
    let packages = resolver.resolve(&opts.packages)?;

    let bound = bind_packages(layout, &packages, generator)?;

    let mut sources = SourceList::new();
    sources.extend(bound.java_files.iter().cloned());

    let source_dir = opts.source_dir.as_deref().map(|dir| ctx.resolve_path(dir));
    sources.extend(add_extra_files(&layout.java_dir, source_dir.as_deref())?);

    let install_dir = match &config.generator.install_dir {
        Some(dir) => ctx.resolve_path(dir),
        None => resolver
            .package_dir(config.bind_package())
            .context("failed to locate the bind package")?,
    };
    let manifest = SupportManifest::new(install_dir);
    create_support_files(
        layout,
        &manifest,
        config.bind_package(),
        &toolchain.jni_include_dirs(),
    )?;

    NativeBuilder::new(&toolchain, config.library_name())
        .with_gopath_mode(config.gopath_mode())
        .build(layout)?;

    sources.extend(manifest.java_sources(layout));
    JavaCompiler::new(&toolchain).compile(layout, &sources)?;

    let summary = create_archive(&ctx.resolve_path(&opts.output), &layout.jar_dir)?;

    Ok(BindResult {
        archive: summary.path,
        entries: summary.entries,
        artifacts: bound.sets.len() * crate::core::ArtifactKind::ALL.len(),
    })
}
