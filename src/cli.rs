// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Deployment settings come from the environment; flags only shape output.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gcf-deploy")]
#[command(about = "Package a directory and deploy it to an existing Google Cloud Function")]
#[command(
    long_about = "Package a directory and deploy it to an existing Google Cloud Function.\n\n\
    Settings are read from the environment: gcp_project, gcp_region, cloud_function_name, \
    cloud_function_directory, credentials (service-account JSON) and optionally debug_mode."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload the source directory and patch the function (default)
    Deploy,

    /// Write the zipped source directory to a local file
    Package {
        /// Where to write the archive
        output: PathBuf,
    },
}
