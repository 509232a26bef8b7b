// ABOUTME: Upload strategy selection based on the fetched function resource.
// ABOUTME: Archive-URL when the function already has a bucket object, upload-URL otherwise.

use std::fmt;

use crate::cloud::FunctionResource;

/// How the new archive reaches the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStrategy {
    /// Overwrite the bucket object named by the function's `sourceArchiveUrl`.
    ArchiveUrl(String),

    /// PUT to a freshly generated signed URL, then point `sourceUploadUrl` at it.
    UploadUrl,
}

impl UploadStrategy {
    /// Pick the strategy for a function. Exactly one applies.
    pub fn for_function(function: &FunctionResource) -> Self {
        match &function.source_archive_url {
            Some(url) => UploadStrategy::ArchiveUrl(url.clone()),
            None => UploadStrategy::UploadUrl,
        }
    }
}

impl fmt::Display for UploadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStrategy::ArchiveUrl(url) => write!(f, "archive URL ({url})"),
            UploadStrategy::UploadUrl => write!(f, "upload URL"),
        }
    }
}
