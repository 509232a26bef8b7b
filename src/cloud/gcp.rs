// ABOUTME: reqwest-backed client for Cloud Functions v1 and Cloud Storage.
// ABOUTME: Implements every capability trait with a single HTTP client and token provider.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use snafu::{OptionExt, ResultExt};
use std::time::Duration;

use super::auth::TokenProvider;
use super::error::{ApiError, ClientBuildSnafu, DecodeSnafu, MissingFieldSnafu, TransportSnafu};
use super::resource::{FunctionResource, GenerateUploadUrlResponse, ObjectLocation, Operation};
use super::traits::{
    ARCHIVE_CONTENT_TYPE, CONTENT_LENGTH_RANGE, CONTENT_LENGTH_RANGE_HEADER, FunctionsApi,
    ObjectStorage, Platform, SignedUrlUpload,
};
use crate::credentials::ServiceAccountKey;

pub const FUNCTIONS_API: &str = "https://cloudfunctions.googleapis.com/v1";
pub const STORAGE_API: &str = "https://storage.googleapis.com";

/// Upper bound for the signed-URL PUT.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Base URLs of the APIs the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub functions: String,
    pub storage: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            functions: FUNCTIONS_API.to_string(),
            storage: STORAGE_API.to_string(),
        }
    }
}

impl Endpoints {
    pub fn function_url(&self, name: &str) -> String {
        format!("{}/{}", self.functions.trim_end_matches('/'), name)
    }

    pub fn generate_upload_url(&self, parent: &str) -> String {
        format!(
            "{}/{}/functions:generateUploadUrl",
            self.functions.trim_end_matches('/'),
            parent
        )
    }

    pub fn object_upload_url(&self, location: &ObjectLocation) -> String {
        format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.storage.trim_end_matches('/'),
            urlencoding::encode(&location.bucket),
            urlencoding::encode(&location.object)
        )
    }
}

/// Connects to Google Cloud with a service-account key.
#[derive(Debug, Clone, Default)]
pub struct GcpPlatform {
    endpoints: Endpoints,
}

impl GcpPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

impl Platform for GcpPlatform {
    type Client = GcpClient;

    fn connect(&self, key: ServiceAccountKey) -> Result<GcpClient, ApiError> {
        GcpClient::new(key, self.endpoints.clone())
    }
}

/// Authenticated client for one deployment run.
pub struct GcpClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    auth: TokenProvider,
}

impl GcpClient {
    pub fn new(key: ServiceAccountKey, endpoints: Endpoints) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gcf-deploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            auth: TokenProvider::new(key, http.clone()),
            http,
            endpoints,
        })
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.auth.access_token().await?;
        Ok(request.bearer_auth(token))
    }
}

/// Turn a non-2xx response into `ApiError::Status`, keeping the body for diagnostics.
pub(crate) async fn check_status(url: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl FunctionsApi for GcpClient {
    async fn get_function(&self, name: &str) -> Result<FunctionResource, ApiError> {
        let url = self.endpoints.function_url(name);
        let request = self.authorized(self.http.get(&url)).await?;
        let response = request
            .send()
            .await
            .context(TransportSnafu { url: url.clone() })?;
        let response = check_status(&url, response).await?;

        response.json().await.context(DecodeSnafu { url })
    }

    async fn generate_upload_url(&self, parent: &str) -> Result<String, ApiError> {
        let url = self.endpoints.generate_upload_url(parent);
        let request = self.authorized(self.http.post(&url)).await?;
        let response = request
            .json(&serde_json::json!({}))
            .send()
            .await
            .context(TransportSnafu { url: url.clone() })?;
        let response = check_status(&url, response).await?;

        let body: GenerateUploadUrlResponse = response
            .json()
            .await
            .context(DecodeSnafu { url: url.clone() })?;
        body.upload_url.context(MissingFieldSnafu {
            url,
            field: "uploadUrl",
        })
    }

    async fn patch_function(
        &self,
        name: &str,
        function: &FunctionResource,
    ) -> Result<Operation, ApiError> {
        let url = self.endpoints.function_url(name);
        let request = self.authorized(self.http.patch(&url)).await?;
        let response = request
            .json(function)
            .send()
            .await
            .context(TransportSnafu { url: url.clone() })?;
        let response = check_status(&url, response).await?;

        response.json().await.context(DecodeSnafu { url })
    }
}

#[async_trait]
impl ObjectStorage for GcpClient {
    async fn write_object(&self, location: &ObjectLocation, data: Bytes) -> Result<(), ApiError> {
        let url = self.endpoints.object_upload_url(location);
        let request = self.authorized(self.http.post(&url)).await?;
        let response = request
            .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
            .body(data)
            .send()
            .await
            .context(TransportSnafu { url: url.clone() })?;
        check_status(&url, response).await?;

        Ok(())
    }
}

#[async_trait]
impl SignedUrlUpload for GcpClient {
    async fn put_archive(&self, upload_url: &str, data: Bytes) -> Result<(), ApiError> {
        let response = self
            .http
            .put(upload_url)
            .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
            .header(CONTENT_LENGTH_RANGE_HEADER, CONTENT_LENGTH_RANGE)
            .timeout(UPLOAD_TIMEOUT)
            .body(data)
            .send()
            .await
            .context(TransportSnafu { url: upload_url })?;

        let status = response.status();
        tracing::info!("HTTP Status Code for uploading data: {}", status.as_u16());

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Response body: {body}");

        if !status.is_success() {
            return Err(ApiError::Status {
                url: upload_url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
