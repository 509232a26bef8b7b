// ABOUTME: Entry point for the gcf-deploy CLI application.
// ABOUTME: Sets up logging and output, then dispatches to the command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use gcf_deploy::cloud::GcpPlatform;
use gcf_deploy::commands;
use gcf_deploy::config::{DEBUG_MODE_KEY, parse_debug_mode};
use gcf_deploy::error::Result;
use gcf_deploy::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // An unparseable debug_mode is reported by the deploy command itself
    let debug_mode = parse_debug_mode(env::var(DEBUG_MODE_KEY).ok().as_deref()).unwrap_or(false);

    let filter = if cli.verbose || debug_mode {
        EnvFilter::new("warn,gcf_deploy=debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli.command, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>, output: &mut Output) -> Result<()> {
    let lookup = |key: &str| env::var(key).ok();

    match command.unwrap_or(Commands::Deploy) {
        Commands::Deploy => {
            let platform = GcpPlatform::new();
            commands::deploy(lookup, &platform, output).await.map(|_| ())
        }
        Commands::Package { output: path } => {
            commands::package(lookup, &path, output).await.map(|_| ())
        }
    }
}
