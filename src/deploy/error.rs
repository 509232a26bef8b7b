// ABOUTME: Error types for deployment stages.
// ABOUTME: One variant per stage, each message naming the stage that failed.

use crate::archive::PackageError;
use crate::cloud::ApiError;
use crate::credentials::InvalidCredentials;

/// Errors that can occur while a deployment is in progress.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The credentials blob is not valid JSON.
    #[error(transparent)]
    InvalidCredentials(#[from] InvalidCredentials),

    /// No usable client could be built from the credentials.
    #[error("Failed to connect to the cloud platform: {0}")]
    Client(#[source] ApiError),

    /// Lookup of the existing function failed, for whatever reason.
    #[error("Cloud function not found: {function}")]
    FunctionNotFound {
        function: String,
        #[source]
        source: ApiError,
    },

    /// The source directory could not be zipped.
    #[error("Failed to package source code: {0}")]
    Package(#[from] PackageError),

    /// The platform refused to hand out an upload URL.
    #[error("Failed to generate upload URL: {0}")]
    UploadUrlGeneration(#[source] ApiError),

    /// Writing the archive failed on either upload path.
    #[error("Failed to upload source code: {0}")]
    Upload(#[source] ApiError),

    /// The function could not be updated to the new source.
    #[error("Failed to patch cloud function: {0}")]
    Patch(#[source] ApiError),
}

impl DeployError {
    /// The cloud error behind this failure, if there is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            DeployError::Client(e)
            | DeployError::FunctionNotFound { source: e, .. }
            | DeployError::UploadUrlGeneration(e)
            | DeployError::Upload(e)
            | DeployError::Patch(e) => Some(e),
            DeployError::InvalidCredentials(_) | DeployError::Package(_) => None,
        }
    }
}
