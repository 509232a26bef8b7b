// ABOUTME: Service-account credential parsing.
// ABOUTME: Only JSON syntax is checked here; the token endpoint rejects bad keys later.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Google's default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, thiserror::Error)]
#[error("Invalid credentials JSON: {0}")]
pub struct InvalidCredentials(#[from] serde_json::Error);

/// A service-account key as downloaded from the cloud console.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Parse a JSON-encoded key.
    pub fn from_json(raw: &str) -> Result<Self, InvalidCredentials> {
        let key: ServiceAccountKey = serde_json::from_str(raw).inspect_err(|e| {
            tracing::error!("Invalid credentials JSON: {e}");
        })?;
        tracing::debug!("Successfully parsed credentials JSON");
        Ok(key)
    }

    /// Token endpoint named in the key, or Google's default.
    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}
