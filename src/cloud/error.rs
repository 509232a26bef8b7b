// ABOUTME: Cloud API error types with SNAFU pattern.
// ABOUTME: Keeps the HTTP status or transport source so callers can tell failures apart.

use snafu::Snafu;

/// Failure talking to the Cloud Functions, Cloud Storage or OAuth2 endpoints.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ApiError {
    #[snafu(display("request to {url} failed: {source}"))]
    Transport { url: String, source: reqwest::Error },

    #[snafu(display("{url} returned HTTP {status}: {body}"))]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[snafu(display("could not decode response from {url}: {source}"))]
    Decode { url: String, source: reqwest::Error },

    #[snafu(display("response from {url} has no {field}"))]
    MissingField { url: String, field: &'static str },

    #[snafu(display("service account key has no {field}"))]
    IncompleteKey { field: &'static str },

    #[snafu(display("could not sign token assertion: {source}"))]
    Sign { source: jsonwebtoken::errors::Error },

    #[snafu(display("could not build HTTP client: {source}"))]
    ClientBuild { source: reqwest::Error },

    #[snafu(display("invalid storage URL {url:?}: {reason}"))]
    InvalidObjectUrl { url: String, reason: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The remote resource does not exist (HTTP 404).
    NotFound,
    /// Credentials were rejected or could not be used.
    Unauthorized,
    /// The request never produced an HTTP response.
    Transport,
    /// Any other remote rejection or malformed response.
    Remote,
    /// The request could not be built locally.
    Local,
}

impl ApiError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Transport { .. } => ApiErrorKind::Transport,
            ApiError::Status { status: 404, .. } => ApiErrorKind::NotFound,
            ApiError::Status {
                status: 401 | 403, ..
            } => ApiErrorKind::Unauthorized,
            ApiError::Status { .. } | ApiError::Decode { .. } | ApiError::MissingField { .. } => {
                ApiErrorKind::Remote
            }
            ApiError::IncompleteKey { .. } | ApiError::Sign { .. } => ApiErrorKind::Unauthorized,
            ApiError::ClientBuild { .. } | ApiError::InvalidObjectUrl { .. } => ApiErrorKind::Local,
        }
    }

    /// HTTP status of the rejected request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ApiErrorKind::NotFound
    }
}
