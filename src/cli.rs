//! CLI argument parsing module for bowup

use clap::Parser;
use std::path::PathBuf;

/// Interactive Bower dependency update checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bowup",
    version,
    about = "Interactive Bower dependency update checker"
)]
pub struct CliArgs {
    /// Project directory containing bower.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Report outdated dependencies without offering to rewrite the manifest
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Answer yes to every confirmation (accept all upgrades, save, back up)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// bower executable to invoke
    #[arg(long, default_value = "bower")]
    pub bower_bin: PathBuf,
}
