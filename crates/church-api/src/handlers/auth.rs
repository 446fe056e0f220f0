//! Authentication handlers
//!
//! Login (JSON and OAuth2 password form), the caller's profile, and
//! self-service password changes.

use axum::{extract::State, Json};
use church_service::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, TokenRequest, UserResponse,
};
use church_service::AuthService;

use crate::extractors::{AuthUser, ValidatedForm, ValidatedJson};
use crate::response::{ApiResult, ErrorBody};
use crate::state::AppState;

/// Login with username (or email) and password
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token and profile", body = AuthResponse),
        (status = 401, description = "Invalid username or password", body = ErrorBody),
        (status = 403, description = "Account inactive", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// OAuth2 password-grant login
///
/// POST /auth/token
#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    tag = "auth",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Bearer token and profile", body = AuthResponse),
        (status = 401, description = "Invalid username or password", body = ErrorBody)
    )
)]
pub async fn token(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<TokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(LoginRequest::from(form)).await?;
    Ok(Json(response))
}

/// Profile of the current user
///
/// GET /auth/me
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    )
)]
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Json<UserResponse> {
    Json(AuthService::new(state.service_context()).me(auth.user()))
}

/// Change the current user's password
///
/// POST /auth/change-password
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    tag = "auth",
    security(("bearer" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = UserResponse),
        (status = 400, description = "Current password incorrect or new password too weak", body = ErrorBody)
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.change_password(auth.user(), request).await?;
    Ok(Json(response))
}
