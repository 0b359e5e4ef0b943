//! `gojava build` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::BuildArgs;
use gojava::core::PackageDescriptor;
use gojava::ops::bind_to_jar::{bind_to_jar, BindOptions};
use gojava::util::config::load_config;
use gojava::util::GlobalContext;

/// Options given before or after the subcommand.
pub struct GlobalArgs {
    pub output: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: BuildArgs, global: GlobalArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    // Load configuration (global + project + --config)
    let explicit = global.config.map(|p| ctx.resolve_path(&p));
    let config = load_config(
        ctx.global_config_path().as_deref(),
        &ctx.project_config_path(),
        explicit.as_deref(),
    )?;

    // Output: CLI > config > default
    let output = global.output.unwrap_or_else(|| config.default_archive());

    let opts = BindOptions {
        packages: args.packages.into_iter().map(PackageDescriptor::new).collect(),
        output,
        source_dir: global.source_dir,
    };

    let result = bind_to_jar(&ctx, &config, &opts)?;

    eprintln!("    Finished building {}", result.archive.display());
    tracing::debug!("{} archive entries", result.entries.len());

    Ok(())
}
