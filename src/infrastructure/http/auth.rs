//! Request extractors for the proxy-supplied identity.
//!
//! The header is trusted as-is; nothing here authenticates it.

use crate::domain::values::identity::Identity;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::SharedState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

fn identity_from(parts: &Parts, header: &str) -> Identity {
    let value = parts
        .headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Identity::from_header(value)
}

/// Whatever identity the request carries, possibly anonymous.
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(identity_from(parts, &state.config.identity_header)))
    }
}

/// Identity present in the allowlist.
pub struct AuthorizedUser(pub Identity);

#[async_trait]
impl FromRequestParts<SharedState> for AuthorizedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let identity = identity_from(parts, &state.config.identity_header);
        if state.backlog.is_authorized(&identity).await? {
            Ok(AuthorizedUser(identity))
        } else {
            tracing::warn!(user = %identity.raw, "rejected unauthorized user");
            Err(ApiError::Forbidden("You have no permission!".into()))
        }
    }
}

/// Identity listed in the configured admin set.
pub struct AdminUser(pub Identity);

#[async_trait]
impl FromRequestParts<SharedState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let identity = identity_from(parts, &state.config.identity_header);
        if state.config.is_admin(&identity.display) {
            Ok(AdminUser(identity))
        } else {
            tracing::warn!(user = %identity.raw, "rejected non-admin user");
            Err(ApiError::Forbidden("Admin access required".into()))
        }
    }
}
