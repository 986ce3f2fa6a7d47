//! Bearer token extraction for protected routes.
//!
//! Handlers that take an [`AuthenticatedUser`] only run once the
//! `Authorization: Bearer <token>` header has been verified. Every failure
//! (missing header, wrong scheme, bad signature, expiry) yields the same
//! `401` so clients cannot probe which check failed.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{DocumentId, Error};
use crate::inbound::http::state::HttpState;

const PERMISSION_DENIED: &str = "Permission denied. Invalid or expired token";

/// Identity proven by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(DocumentId);

impl AuthenticatedUser {
    /// Subject the token was issued for.
    pub fn id(&self) -> &DocumentId {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let denied = || Error::permission_denied(PERMISSION_DENIED);
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        return Err(Error::internal("HTTP state is not configured"));
    };
    let token = bearer_token(req).ok_or_else(|| {
        debug!("request without a bearer token");
        denied()
    })?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|error| {
            debug!(%error, "bearer token rejected");
            denied()
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
