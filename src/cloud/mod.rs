// ABOUTME: Cloud platform access: capability traits, documents, and the Google implementation.
// ABOUTME: The orchestrator depends only on the traits so it can run against fakes.

mod auth;
mod error;
mod gcp;
mod resource;
mod traits;

pub use auth::{CLOUD_PLATFORM_SCOPE, TokenProvider};
pub use error::{ApiError, ApiErrorKind};
pub use gcp::{Endpoints, FUNCTIONS_API, GcpClient, GcpPlatform, STORAGE_API, UPLOAD_TIMEOUT};
pub use resource::{FunctionResource, ObjectLocation, Operation};
pub use traits::{
    ARCHIVE_CONTENT_TYPE, CONTENT_LENGTH_RANGE, CONTENT_LENGTH_RANGE_HEADER, FunctionsApi,
    ObjectStorage, Platform, SignedUrlUpload,
};
