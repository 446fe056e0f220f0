//! Attendance handlers
//!
//! Staff marking, bulk marking and maintenance require the attendance
//! capability. The two QR self check-in steps are public.

use axum::{extract::State, Json};
use church_core::Capability;
use church_service::dto::{
    AttendanceListQuery, AttendanceResponse, BulkAttendanceResponse, BulkMarkAttendanceRequest,
    MarkAttendanceRequest, PageParams, PaginatedResponse, QrConfirmRequest, QrLookupRequest,
    QrLookupResponse, UpdateAttendanceRequest,
};
use church_service::AttendanceService;

use crate::extractors::{AuthUser, IdPath, Paging, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody};
use crate::state::AppState;

// ============================================================================
// QR self check-in (public)
// ============================================================================

/// Step 1: look up a member by phone number; nothing is written
///
/// POST /attendance/qr/lookup
#[utoipa::path(
    post,
    path = "/api/v1/attendance/qr/lookup",
    tag = "attendance",
    request_body = QrLookupRequest,
    responses(
        (status = 200, description = "Member to confirm", body = QrLookupResponse),
        (status = 404, description = "No member with that phone number", body = ErrorBody)
    )
)]
pub async fn qr_lookup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QrLookupRequest>,
) -> ApiResult<Json<QrLookupResponse>> {
    let response = AttendanceService::new(state.service_context())
        .lookup_by_phone(request)
        .await?;
    Ok(Json(response))
}

/// Step 2: confirm identity and record a present mark
///
/// POST /attendance/qr/confirm
#[utoipa::path(
    post,
    path = "/api/v1/attendance/qr/confirm",
    tag = "attendance",
    request_body = QrConfirmRequest,
    responses(
        (status = 201, description = "Checked in", body = AttendanceResponse),
        (status = 404, description = "Unknown member", body = ErrorBody),
        (status = 409, description = "Already checked in for that date", body = ErrorBody)
    )
)]
pub async fn qr_confirm(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QrConfirmRequest>,
) -> ApiResult<Created<Json<AttendanceResponse>>> {
    let response = AttendanceService::new(state.service_context())
        .confirm_and_mark(request)
        .await?;
    Ok(Created(Json(response)))
}

// ============================================================================
// Staff marking
// ============================================================================

/// Mark one member
///
/// POST /attendance
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    tag = "attendance",
    security(("bearer" = [])),
    request_body = MarkAttendanceRequest,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceResponse),
        (status = 404, description = "Unknown or deleted member", body = ErrorBody),
        (status = 409, description = "Already recorded for that date", body = ErrorBody)
    )
)]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<MarkAttendanceRequest>,
) -> ApiResult<Created<Json<AttendanceResponse>>> {
    let caller = auth.require(Capability::AccessAttendance)?;
    let response = AttendanceService::new(state.service_context())
        .mark(caller, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Mark many members with one status and date
///
/// POST /attendance/bulk
#[utoipa::path(
    post,
    path = "/api/v1/attendance/bulk",
    tag = "attendance",
    security(("bearer" = [])),
    request_body = BulkMarkAttendanceRequest,
    responses(
        (status = 201, description = "Created and skipped members", body = BulkAttendanceResponse),
        (status = 409, description = "A concurrent mark collided; nothing was recorded", body = ErrorBody)
    )
)]
pub async fn bulk_mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<BulkMarkAttendanceRequest>,
) -> ApiResult<Created<Json<BulkAttendanceResponse>>> {
    let caller = auth.require(Capability::AccessAttendance)?;
    let response = AttendanceService::new(state.service_context())
        .bulk_mark(caller, request)
        .await?;
    Ok(Created(Json(response)))
}

// ============================================================================
// Maintenance
// ============================================================================

/// List attendance records, most recent first
///
/// GET /attendance
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    tag = "attendance",
    security(("bearer" = [])),
    params(PageParams, AttendanceListQuery),
    responses(
        (status = 200, description = "One page of records", body = PaginatedResponse<AttendanceResponse>)
    )
)]
pub async fn list_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Paging(page): Paging,
    QueryParams(query): QueryParams<AttendanceListQuery>,
) -> ApiResult<Json<PaginatedResponse<AttendanceResponse>>> {
    auth.require(Capability::AccessAttendance)?;
    let response = AttendanceService::new(state.service_context())
        .list(query, page)
        .await?;
    Ok(Json(response))
}

/// Get one record
///
/// GET /attendance/:id
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{id}",
    tag = "attendance",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Attendance record", body = AttendanceResponse),
        (status = 404, description = "Unknown or deleted record", body = ErrorBody)
    )
)]
pub async fn get_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(attendance_id): IdPath,
) -> ApiResult<Json<AttendanceResponse>> {
    auth.require(Capability::AccessAttendance)?;
    let response = AttendanceService::new(state.service_context())
        .get(attendance_id)
        .await?;
    Ok(Json(response))
}

/// Change status or notes
///
/// PUT /attendance/:id
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    tag = "attendance",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Attendance id")),
    request_body = UpdateAttendanceRequest,
    responses(
        (status = 200, description = "Updated record", body = AttendanceResponse),
        (status = 404, description = "Unknown or deleted record", body = ErrorBody)
    )
)]
pub async fn update_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(attendance_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateAttendanceRequest>,
) -> ApiResult<Json<AttendanceResponse>> {
    auth.require(Capability::AccessAttendance)?;
    let response = AttendanceService::new(state.service_context())
        .update(attendance_id, request)
        .await?;
    Ok(Json(response))
}

/// Soft delete a record
///
/// DELETE /attendance/:id
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    tag = "attendance",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "The record, now deleted", body = AttendanceResponse),
        (status = 404, description = "Unknown or deleted record", body = ErrorBody)
    )
)]
pub async fn delete_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(attendance_id): IdPath,
) -> ApiResult<Json<AttendanceResponse>> {
    auth.require(Capability::AccessAttendance)?;
    let response = AttendanceService::new(state.service_context())
        .delete(attendance_id)
        .await?;
    Ok(Json(response))
}
