//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to a live user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use church_core::{authorize, Capability, User};
use church_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller, reloaded from storage on every request
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// The resolved user
    pub fn user(&self) -> &User {
        &self.0
    }

    /// Gate the request on a capability of the caller's role
    pub fn require(&self, capability: Capability) -> Result<&User, ApiError> {
        authorize(&self.0, capability)?;
        Ok(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                e
            })?;

        Ok(AuthUser(user))
    }
}
