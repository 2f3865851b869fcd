//! OAuth 2.0 token introspection (RFC 7662) over `reqwest`.
//!
//! The provider is asked whether a bearer token is active and who it was
//! issued to. Every failure is folded into "unauthenticated"; the reason is
//! only visible in debug logs, keyed by a fingerprint of the token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::UserId;
use crate::domain::ports::TokenVerifier;

/// Reason a token did not resolve to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// The provider could not be reached or timed out.
    #[error("introspection transport failed: {message}")]
    Transport { message: String },
    /// The provider answered with a non-success status.
    #[error("introspection returned status {status}")]
    Status { status: u16 },
    /// The response body was not an introspection document.
    #[error("introspection response could not be decoded: {message}")]
    Decode { message: String },
    /// The provider reported the token as inactive.
    #[error("token is not active")]
    Inactive,
    /// The token is active but its subject is not a valid user id.
    #[error("token subject is missing or invalid")]
    InvalidSubject,
}

#[derive(Debug, Deserialize)]
struct IntrospectionResponse {
    #[serde(default)]
    active: bool,
    sub: Option<String>,
}

/// Token verifier backed by an introspection endpoint.
pub struct IntrospectionTokenVerifier {
    client: Client,
    endpoint: Url,
    secret: Zeroizing<String>,
}

impl std::fmt::Debug for IntrospectionTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntrospectionTokenVerifier")
            .field("endpoint", &self.endpoint.as_str())
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl IntrospectionTokenVerifier {
    /// Build a verifier posting to `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    /// Returns the underlying `reqwest` error when the HTTP client cannot be
    /// constructed.
    pub fn new(
        endpoint: Url,
        secret: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            secret,
        })
    }

    async fn introspect(&self, token: &str) -> Result<UserId, TokenRejection> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.secret.as_str())
            .form(&[("token", token)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        interpret_response(status, &body)
    }
}

#[async_trait]
impl TokenVerifier for IntrospectionTokenVerifier {
    async fn verify(&self, token: &str) -> Option<UserId> {
        match self.introspect(token).await {
            Ok(user_id) => Some(user_id),
            Err(rejection) => {
                debug!(
                    token_fingerprint = %fingerprint(token),
                    reason = %rejection,
                    "bearer token rejected"
                );
                None
            }
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> TokenRejection {
    let message = if error.is_timeout() {
        format!("timed out: {error}")
    } else {
        error.to_string()
    };
    TokenRejection::Transport { message }
}

/// Turn an introspection response into a user or a rejection.
pub(crate) fn interpret_response(status: StatusCode, body: &[u8]) -> Result<UserId, TokenRejection> {
    if !status.is_success() {
        return Err(TokenRejection::Status {
            status: status.as_u16(),
        });
    }

    let document: IntrospectionResponse =
        serde_json::from_slice(body).map_err(|err| TokenRejection::Decode {
            message: err.to_string(),
        })?;

    if !document.active {
        return Err(TokenRejection::Inactive);
    }

    document
        .sub
        .ok_or(TokenRejection::InvalidSubject)
        .and_then(|sub| UserId::new(sub).map_err(|_| TokenRejection::InvalidSubject))
}

/// Hex SHA-256 digest of `token`, safe to write to logs.
pub fn fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
