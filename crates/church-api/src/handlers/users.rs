//! User directory handlers (super admin only)

use axum::{extract::State, Json};
use church_core::Capability;
use church_service::dto::{
    CreateUserRequest, PageParams, PaginatedResponse, ResetPasswordRequest, UpdateUserRequest,
    UserListQuery, UserResponse,
};
use church_service::UserService;

use crate::extractors::{AuthUser, IdPath, Paging, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody};
use crate::state::AppState;

/// Create a staff user
///
/// POST /users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorBody),
        (status = 409, description = "Username or email taken", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    auth.require(Capability::ManageUsers)?;
    let response = UserService::new(state.service_context())
        .create(request)
        .await?;
    Ok(Created(Json(response)))
}

/// List staff users
///
/// GET /users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer" = [])),
    params(PageParams, UserListQuery),
    responses(
        (status = 200, description = "One page of users", body = PaginatedResponse<UserResponse>),
        (status = 403, description = "Caller is not a super admin", body = ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Paging(page): Paging,
    QueryParams(query): QueryParams<UserListQuery>,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    auth.require(Capability::ManageUsers)?;
    let response = UserService::new(state.service_context())
        .list(query, page)
        .await?;
    Ok(Json(response))
}

/// Get a staff user
///
/// GET /users/:id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown or deleted user", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    auth.require(Capability::ManageUsers)?;
    let response = UserService::new(state.service_context())
        .get(user_id)
        .await?;
    Ok(Json(response))
}

/// Partially update a staff user
///
/// PUT /users/:id
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 409, description = "Email taken, or demoting the last super admin", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    auth.require(Capability::ManageUsers)?;
    let response = UserService::new(state.service_context())
        .update(user_id, request)
        .await?;
    Ok(Json(response))
}

/// Reset a user's password; they must change it on next sign-in
///
/// POST /users/:id/reset-password
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/reset-password",
    tag = "users",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = UserResponse),
        (status = 400, description = "Password too weak", body = ErrorBody)
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<UserResponse>> {
    auth.require(Capability::ManageUsers)?;
    let response = UserService::new(state.service_context())
        .reset_password(user_id, request)
        .await?;
    Ok(Json(response))
}

/// Soft delete and deactivate a staff user
///
/// DELETE /users/:id
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user, now deleted", body = UserResponse),
        (status = 409, description = "Last super admin", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    auth.require(Capability::ManageUsers)?;
    let response = UserService::new(state.service_context())
        .delete(user_id)
        .await?;
    Ok(Json(response))
}
