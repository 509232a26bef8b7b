// ABOUTME: OAuth2 access tokens for a service account via the JWT-bearer grant.
// ABOUTME: The token is requested lazily and reused for the rest of the run.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use tokio::sync::OnceCell;

use super::error::{
    ApiError, DecodeSnafu, IncompleteKeySnafu, MissingFieldSnafu, SignSnafu, TransportSnafu,
};
use crate::credentials::ServiceAccountKey;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Claims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Supplies bearer tokens for a single service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    http: reqwest::Client,
    token: OnceCell<String>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Self {
        Self {
            key,
            http,
            token: OnceCell::new(),
        }
    }

    /// Claims for an assertion issued at `now`.
    pub(crate) fn claims(&self, now: DateTime<Utc>) -> Result<Claims<'_>, ApiError> {
        let iss = self.key.client_email.as_deref().context(IncompleteKeySnafu {
            field: "client_email",
        })?;
        let iat = now.timestamp();
        Ok(Claims {
            iss,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: self.key.token_uri(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        })
    }

    /// Signed RS256 assertion for the token endpoint.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, ApiError> {
        let pem = self.key.private_key.as_deref().context(IncompleteKeySnafu {
            field: "private_key",
        })?;
        let claims = self.claims(now)?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(pem.as_bytes()).context(SignSnafu)?;
        jsonwebtoken::encode(&header, &claims, &key).context(SignSnafu)
    }

    /// Bearer token, fetched on first use.
    pub async fn access_token(&self) -> Result<&str, ApiError> {
        let token = self
            .token
            .get_or_try_init(|| self.request_token())
            .await?;
        Ok(token.as_str())
    }

    async fn request_token(&self) -> Result<String, ApiError> {
        let url = self.key.token_uri().to_string();
        let assertion = self.assertion(Utc::now())?;

        tracing::debug!("Requesting access token from {url}");
        let response = self
            .http
            .post(&url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context(TransportSnafu { url: url.clone() })?;

        let response = super::gcp::check_status(&url, response).await?;
        let body: TokenResponse = response.json().await.context(DecodeSnafu { url: url.clone() })?;

        body.access_token.context(MissingFieldSnafu {
            url,
            field: "access_token",
        })
    }
}
