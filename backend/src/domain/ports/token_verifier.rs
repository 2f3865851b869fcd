//! Driven port resolving bearer tokens to users.

use async_trait::async_trait;

use crate::domain::UserId;

/// Identity used by [`StubTokenVerifier::authenticated`] when none is given.
pub const DEFAULT_STUB_USER_ID: &str = "test-user";

/// Port for verifying bearer tokens.
///
/// Implementations collapse every failure (expired, malformed, revoked,
/// provider unreachable) into `None`; callers only learn whether a request
/// is authenticated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolve `token` to the user it was issued for.
    async fn verify(&self, token: &str) -> Option<UserId>;
}

/// Verifier for development and tests that never contacts a provider.
///
/// # Examples
/// ```
/// use pantry::domain::ports::{StubTokenVerifier, TokenVerifier};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let verifier = StubTokenVerifier::default();
/// let user = verifier.verify("anything").await.expect("stub accepts tokens");
/// assert_eq!(user.as_str(), "test-user");
/// assert!(StubTokenVerifier::refusing().verify("anything").await.is_none());
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubTokenVerifier {
    user_id: Option<UserId>,
}

impl StubTokenVerifier {
    /// Accept every token as `user_id`.
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Reject every token.
    pub fn refusing() -> Self {
        Self { user_id: None }
    }
}

impl Default for StubTokenVerifier {
    fn default() -> Self {
        match UserId::new(DEFAULT_STUB_USER_ID) {
            Ok(user_id) => Self::authenticated(user_id),
            Err(_) => Self::refusing(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StubTokenVerifier {
    async fn verify(&self, _token: &str) -> Option<UserId> {
        self.user_id.clone()
    }
}
