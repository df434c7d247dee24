// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the deploy and quickstart subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use deployhelp::config::DEFAULT_DEPLOY_DIR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deployhelp")]
#[command(about = "Scaffold and run docker compose deployments for Python projects")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run compose tasks against deploy targets
    Deploy(DeployArgs),

    /// Create a deploy directory with config, Dockerfile and compose templates
    Quickstart(QuickstartArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Directory with deploy scripts (normally generated by `quickstart`)
    #[arg(short, long, default_value = DEFAULT_DEPLOY_DIR)]
    pub deploydir: PathBuf,

    /// Task to run; repeat or separate with commas (`all` for every task)
    #[arg(long = "task", value_delimiter = ',')]
    pub tasks: Vec<String>,

    /// Target to deploy to; repeat or separate with commas (`all` for every target)
    #[arg(long = "target", value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Never prompt; use the given values or configured defaults
    #[arg(short, long)]
    pub silent: bool,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct QuickstartArgs {
    /// Directory to create the deploy scripts in
    #[arg(short, long, default_value = DEFAULT_DEPLOY_DIR)]
    pub deploydir: PathBuf,

    /// Project name (defaults to the current directory name)
    #[arg(long)]
    pub project_name: Option<String>,

    /// Tasks to generate: build, up, down; repeat or separate with commas
    #[arg(long = "task", value_delimiter = ',')]
    pub tasks: Vec<String>,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}
