// ABOUTME: Deploy command implementation.
// ABOUTME: Validates config, checks the source directory, then runs the deployment state machine.

use std::path::Path;

use crate::cloud::Platform;
use crate::config::DeployConfig;
use crate::credentials::ServiceAccountKey;
use crate::deploy::{DeployError, DeployReport, Deployment};
use crate::error::{Error, Result};
use crate::output::Output;

use super::config_error;

/// Deploy the configured directory to the configured function.
///
/// Runs `Validating -> CheckingDirectory -> Deploying`. No network call is
/// made before the first two phases pass. Stage failures during `Deploying`
/// are logged and surfaced as `Error::DeployFailed`.
pub async fn deploy<P, F>(lookup: F, platform: &P, output: &mut Output) -> Result<DeployReport>
where
    P: Platform,
    F: Fn(&str) -> Option<String>,
{
    output.start_timer();
    tracing::info!("Starting cloud function deployment process");

    let config = DeployConfig::from_lookup(lookup).map_err(config_error)?;
    if config.debug_mode {
        tracing::debug!("Debug mode enabled");
    }

    check_directory(&config.source_directory)?;

    let debug_mode = config.debug_mode;
    let function_name = config.function_name.clone();
    output.progress(&format!(
        "Deploying {} from {}",
        function_name,
        config.source_directory.display()
    ));

    match run_deployment(config, platform, output).await {
        Ok(report) => {
            tracing::info!("Cloud function deployment completed successfully");
            let operation = report.operation_name().unwrap_or("<none>");
            output.success(&format!(
                "Deployed {function_name} (operation {operation})"
            ));
            Ok(report)
        }
        Err(e) => {
            handle_failure(&e, debug_mode);
            Err(Error::deploy_failed(e))
        }
    }
}

/// Fail unless `path` is an existing directory.
pub fn check_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        tracing::info!("Cloud function directory exists: {}", path.display());
        Ok(())
    } else {
        tracing::error!("Cloud function directory does not exist: {}", path.display());
        Err(Error::CloudFunctionDirectoryNonExistent(path.to_path_buf()))
    }
}

/// Run the deployment state machine.
async fn run_deployment<P: Platform>(
    config: DeployConfig,
    platform: &P,
    output: &Output,
) -> std::result::Result<DeployReport, DeployError> {
    tracing::info!("Starting cloud function deployment...");

    let key = ServiceAccountKey::from_json(&config.credentials_json)?;
    let client = platform.connect(key).map_err(DeployError::Client)?;

    output.progress("  → Looking up function...");
    let deployment = Deployment::new(config).locate(&client).await?;
    output.progress(&format!("  → Upload strategy: {}", deployment.strategy()));

    output.progress("  → Packaging source directory...");
    let deployment = deployment.package().await?;
    output.progress(&format!(
        "  → Packaged {} file(s), {} bytes",
        deployment.archive().entries().len(),
        deployment.archive().len()
    ));
    if deployment.archive().entries().is_empty() {
        output.warning("Source directory contains no files; deploying an empty archive");
    }

    output.progress("  → Uploading source...");
    let deployment = deployment.upload(&client).await?;

    output.progress("  → Patching function...");
    let deployment = deployment.patch(&client).await?;

    Ok(deployment.finish())
}

fn handle_failure(err: &DeployError, debug_mode: bool) {
    tracing::error!("Deployment error: {err}");

    if debug_mode {
        tracing::debug!("Exception details: {err:#?}");
    }
}
