// ABOUTME: Capability traits for the cloud platform.
// ABOUTME: FunctionsApi, ObjectStorage, SignedUrlUpload and the Platform that connects them.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::ApiError;
use super::resource::{FunctionResource, ObjectLocation, Operation};
use crate::credentials::ServiceAccountKey;

/// Header values sent with every signed-URL upload.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";
pub const CONTENT_LENGTH_RANGE_HEADER: &str = "x-goog-content-length-range";
/// Accept archives between 0 bytes and 100 MiB.
pub const CONTENT_LENGTH_RANGE: &str = "0,104857600";

/// Cloud Functions resource operations.
#[async_trait]
pub trait FunctionsApi: Send + Sync {
    /// Read a function by its fully-qualified name.
    async fn get_function(&self, name: &str) -> Result<FunctionResource, ApiError>;

    /// Obtain a short-lived upload URL scoped to `parent`.
    async fn generate_upload_url(&self, parent: &str) -> Result<String, ApiError>;

    /// Replace the function's configuration with `function`.
    async fn patch_function(
        &self,
        name: &str,
        function: &FunctionResource,
    ) -> Result<Operation, ApiError>;
}

/// Whole-object writes to a storage bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn write_object(&self, location: &ObjectLocation, data: Bytes) -> Result<(), ApiError>;
}

/// PUT of an archive to a pre-signed upload URL.
#[async_trait]
pub trait SignedUrlUpload: Send + Sync {
    /// Any non-2xx answer is an error.
    async fn put_archive(&self, upload_url: &str, data: Bytes) -> Result<(), ApiError>;
}

/// Entry point to a cloud platform: turns a credential into a client.
pub trait Platform {
    type Client: FunctionsApi + ObjectStorage + SignedUrlUpload;

    fn connect(&self, key: ServiceAccountKey) -> Result<Self::Client, ApiError>;
}
