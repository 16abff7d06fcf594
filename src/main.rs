//! bowup - interactive Bower dependency update checker
//!
//! Checks the declared constraints in bower.json against the latest
//! published versions (through the bower CLI, inside a disposable working
//! copy) and rewrites accepted upgrades in place after confirmation.

use bowup::cli::CliArgs;
use bowup::orchestrator::Orchestrator;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Print version info in verbose mode
    if args.verbose {
        eprintln!("bowup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(args.clone());

    // Ctrl-C during the async phases cancels the run here and the working
    // copy cleans up on drop; during a prompt the prompter itself maps the
    // interrupt to "decline all remaining".
    let summary = tokio::select! {
        result = orchestrator.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted.");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Print recoverable problems in verbose mode
    if args.verbose && !summary.warnings.is_empty() {
        eprintln!();
        eprintln!("Problems encountered:");
        for warning in &summary.warnings {
            eprintln!("  - {}", warning);
        }
    }

    Ok(ExitCode::SUCCESS)
}
