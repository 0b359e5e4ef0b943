//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// gojava - bind Go packages into a Java archive
#[derive(Parser)]
#[command(name = "gojava")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Jar file to write (default: libgojava.jar)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Directory of additional Java sources to compile into the jar
    #[arg(short, long, global = true)]
    pub source_dir: Option<PathBuf>,

    /// Configuration file, merged over the global and project files
    #[arg(long, global = true, env = "GOJAVA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate bindings for Go packages and package them into a jar
    Build(BuildArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Go import paths to bind
    #[arg(required = true, num_args = 1..)]
    pub packages: Vec<String>,
}
