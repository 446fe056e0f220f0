//! Member directory handlers
//!
//! Every active staff role may use the member directory.

use axum::{extract::State, Json};
use church_core::Capability;
use church_service::dto::{
    CreateMemberRequest, MemberListQuery, MemberResponse, PageParams, PaginatedResponse,
    UpdateMemberRequest,
};
use church_service::MemberService;

use crate::extractors::{AuthUser, IdPath, Paging, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody};
use crate::state::AppState;

/// Create a member
///
/// POST /members
#[utoipa::path(
    post,
    path = "/api/v1/members",
    tag = "members",
    security(("bearer" = [])),
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Invalid member data", body = ErrorBody),
        (status = 409, description = "Email already used by another member", body = ErrorBody)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    auth.require(Capability::AccessMembers)?;
    let response = MemberService::new(state.service_context())
        .create(request)
        .await?;
    Ok(Created(Json(response)))
}

/// List members
///
/// GET /members
#[utoipa::path(
    get,
    path = "/api/v1/members",
    tag = "members",
    security(("bearer" = [])),
    params(PageParams, MemberListQuery),
    responses(
        (status = 200, description = "One page of members", body = PaginatedResponse<MemberResponse>)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Paging(page): Paging,
    QueryParams(query): QueryParams<MemberListQuery>,
) -> ApiResult<Json<PaginatedResponse<MemberResponse>>> {
    auth.require(Capability::AccessMembers)?;
    let response = MemberService::new(state.service_context())
        .list(query, page)
        .await?;
    Ok(Json(response))
}

/// Get a member
///
/// GET /members/:id
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}",
    tag = "members",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member", body = MemberResponse),
        (status = 404, description = "Unknown or deleted member", body = ErrorBody)
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(member_id): IdPath,
) -> ApiResult<Json<MemberResponse>> {
    auth.require(Capability::AccessMembers)?;
    let response = MemberService::new(state.service_context())
        .get(member_id)
        .await?;
    Ok(Json(response))
}

/// Partially update a member
///
/// PUT /members/:id
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}",
    tag = "members",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Member id")),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Updated member", body = MemberResponse),
        (status = 404, description = "Unknown or deleted member", body = ErrorBody),
        (status = 409, description = "Email already used by another member", body = ErrorBody)
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(member_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    auth.require(Capability::AccessMembers)?;
    let response = MemberService::new(state.service_context())
        .update(member_id, request)
        .await?;
    Ok(Json(response))
}

/// Soft delete a member
///
/// DELETE /members/:id
#[utoipa::path(
    delete,
    path = "/api/v1/members/{id}",
    tag = "members",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Member id")),
    responses(
        (status = 200, description = "The member, now deleted", body = MemberResponse),
        (status = 404, description = "Unknown or deleted member", body = ErrorBody)
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(member_id): IdPath,
) -> ApiResult<Json<MemberResponse>> {
    auth.require(Capability::AccessMembers)?;
    let response = MemberService::new(state.service_context())
        .delete(member_id)
        .await?;
    Ok(Json(response))
}
