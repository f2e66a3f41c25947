//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Actions Launcher - run a released CLI tool from a GitHub Actions step
///
/// Resolves the release archive for the package declared in the manifest,
/// caches the extracted binary and runs it with arguments built from the
/// step's inputs.
#[derive(Parser, Debug)]
#[command(name = "actions-launcher")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Package manifest declaring the tool to launch
    #[arg(
        short,
        long,
        global = true,
        env = "ACTIONS_LAUNCHER_MANIFEST",
        default_value = "Cargo.toml"
    )]
    pub manifest: PathBuf,

    /// Tool cache root
    #[arg(long, global = true, env = "RUNNER_TOOL_CACHE")]
    pub cache_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ACTIONS_LAUNCHER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the buildpack job matrix
    GenerateBuildpackMatrix,

    /// Render changelog entries (inputs: version, unreleased)
    GenerateChangelog,

    /// Prepare a release (inputs: bump)
    PrepareRelease,

    /// Update builders to a new buildpack (inputs: path, buildpack_id,
    /// buildpack_version, buildpack_uri, builders)
    UpdateBuilder,

    /// Run the tool with explicit arguments
    Exec(ExecArgs),

    /// Resolve the tool into the cache and print its path
    Resolve(ResolveArgs),
}

/// Arguments for the exec command
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Arguments passed to the tool
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Print a JSON record instead of the bare path
    #[arg(long)]
    pub json: bool,
}
