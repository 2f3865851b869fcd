//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers take an [`AuthenticatedUser`] argument; the extractor reads the
//! `Authorization` header, asks the configured `TokenVerifier` who the token
//! belongs to, and rejects the request with `401` otherwise. Only the resolved
//! `UserId` travels further into the domain.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Borrow the resolved user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let token = token.ok_or_else(|| Error::unauthorized("missing bearer token"))?;
            state
                .tokens
                .verify(&token)
                .await
                .map(AuthenticatedUser)
                .ok_or_else(|| Error::unauthorized("invalid or expired token"))
        })
    }
}
