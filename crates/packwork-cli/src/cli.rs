//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use packwork_config::Profile;

/// Inspect build configurations: effective config, file routing and
/// output names
#[derive(Parser, Debug)]
#[command(name = "packwork", version)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration as JSON
    Config(ConfigArgs),

    /// Show which transform chain each file is routed through
    Classify(ClassifyArgs),

    /// Render an output naming template
    Name(NameArgs),
}

/// Where the configuration comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Profile to resolve. Defaults to the `isProduction` environment flag
    #[arg(short, long)]
    pub profile: Option<Profile>,

    /// Project directory containing packwork.toml. Without it the built-in
    /// presets are used
    #[arg(short, long, value_name = "DIR")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Use the shared base with the development overlay instead of the
    /// standalone preset
    #[arg(long, conflicts_with_all = ["profile", "config"])]
    pub common: bool,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fail when a file matches no rule
    #[arg(long)]
    pub strict: bool,

    /// Files to classify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Template such as `[name].[contenthash:8].js`
    pub template: String,

    /// Fill name, ext, path and contenthash from this file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub ext: Option<String>,

    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub hash: Option<String>,

    #[arg(long)]
    pub chunkhash: Option<String>,

    #[arg(long)]
    pub contenthash: Option<String>,
}
