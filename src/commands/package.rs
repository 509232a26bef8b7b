// ABOUTME: Package command implementation.
// ABOUTME: Zips the source directory to a local file without contacting the platform.

use std::path::Path;

use crate::archive::Archive;
use crate::config::source_directory_from_lookup;
use crate::deploy::DeployError;
use crate::error::{Error, Result};
use crate::output::Output;

use super::{check_directory, config_error};

/// Write the archive for the configured source directory to `destination`.
pub async fn package<F>(lookup: F, destination: &Path, output: &mut Output) -> Result<Archive>
where
    F: Fn(&str) -> Option<String>,
{
    output.start_timer();

    let source = source_directory_from_lookup(lookup).map_err(config_error)?;
    check_directory(&source)?;

    output.progress(&format!("Packaging {}", source.display()));
    let archive = Archive::from_directory_blocking(source.clone())
        .await
        .map_err(|e| Error::stage_failed(DeployError::Package(e)))?;
    if archive.entries().is_empty() {
        output.warning(&format!("{} contains no files", source.display()));
    }
    archive
        .save(destination)
        .map_err(|e| Error::stage_failed(DeployError::Package(e)))?;

    output.success(&format!(
        "Wrote {} file(s) to {}",
        archive.entries().len(),
        destination.display()
    ));
    Ok(archive)
}
