// ABOUTME: Documents exchanged with the Cloud Functions and Cloud Storage APIs.
// ABOUTME: Known fields are typed; everything else rides along in a passthrough map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::error::ApiError;

/// A Cloud Functions v1 `CloudFunction` resource.
///
/// Only the fields the deployment touches are typed. Unknown keys are kept
/// in `extra` and sent back untouched when the resource is patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_archive_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_upload_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Long-running operation returned by a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `functions:generateUploadUrl`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateUploadUrlResponse {
    pub upload_url: Option<String>,
}

/// A storage object addressed by bucket and object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub object: String,
}

impl ObjectLocation {
    /// Split an archive URL such as `gs://bucket/path/source.zip`.
    ///
    /// The host is the bucket, the path without its leading slash is the object.
    /// The object name is taken verbatim from the input, never percent-encoded.
    pub fn parse(archive_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidObjectUrl {
            url: archive_url.to_string(),
            reason: reason.to_string(),
        };

        let url = url::Url::parse(archive_url).map_err(|e| invalid(&e.to_string()))?;
        let bucket = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("no bucket name"))?;
        let object = raw_object(archive_url);
        if object.is_empty() {
            return Err(invalid("no object name"));
        }

        Ok(ObjectLocation {
            bucket: bucket.to_string(),
            object: object.to_string(),
        })
    }
}

/// Path of `scheme://authority/path?query#fragment` as written, leading slash dropped.
fn raw_object(archive_url: &str) -> &str {
    let after_scheme = archive_url
        .split_once("://")
        .map_or(archive_url, |(_, rest)| rest);
    let path = after_scheme.split_once('/').map_or("", |(_, path)| path);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.trim_start_matches('/')
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.object)
    }
}
