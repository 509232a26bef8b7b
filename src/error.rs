// ABOUTME: Application-wide error taxonomy for gcf-deploy.
// ABOUTME: Three named kinds reach the caller; everything else is folded into DeployFailed.

use crate::deploy::DeployError;
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

/// Message used when a deployment stage failed and was already logged.
pub const DEPLOYMENT_FAILED: &str = "Deployment failed due to errors";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing `{0}` config")]
    MissingConfig(String),

    #[error("Cloud function directory does not exist: {}", .0.display())]
    CloudFunctionDirectoryNonExistent(PathBuf),

    #[error("{message}")]
    DeployFailed {
        message: String,
        #[source]
        source: Option<DeployError>,
    },
}

impl Error {
    /// A deployment failure caused by one of the pipeline stages.
    pub fn deploy_failed(source: DeployError) -> Self {
        Error::DeployFailed {
            message: DEPLOYMENT_FAILED.to_string(),
            source: Some(source),
        }
    }

    /// A failure reported with the stage's own message.
    pub fn stage_failed(source: DeployError) -> Self {
        Error::DeployFailed {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Wrap an error that falls outside the named kinds.
    pub fn unexpected(err: impl Display) -> Self {
        Error::DeployFailed {
            message: format!("Unexpected error: {err}"),
            source: None,
        }
    }

    /// The stage error behind a `DeployFailed`, if any.
    pub fn stage(&self) -> Option<&DeployError> {
        match self {
            Error::DeployFailed { source, .. } => source.as_ref(),
            _ => None,
        }
    }
}

impl From<DeployError> for Error {
    fn from(err: DeployError) -> Self {
        Error::deploy_failed(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
