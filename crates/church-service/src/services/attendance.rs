//! Attendance workflow
//!
//! Staff marking (single and bulk), the two-step public QR self check-in, and
//! record maintenance.
//!
//! Duplicate detection is two-layered: a read-side pre-check gives the normal
//! `Conflict`, and the partial unique index on (member, date) catches the
//! concurrent case. The repository reports that index violation as a domain
//! conflict, so a lost race surfaces as the same error the pre-check would
//! have produced.

use std::collections::HashSet;

use church_core::entities::validate_notes;
use church_core::{
    Attendance, AttendanceFilter, AttendancePatch, AttendanceRecord, DomainError, Member,
    PageRequest, User,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AttendanceListQuery, AttendanceResponse, BulkAttendanceResponse, BulkMarkAttendanceRequest,
    MarkAttendanceRequest, PaginatedResponse, QrConfirmRequest, QrLookupRequest,
    QrLookupResponse, UpdateAttendanceRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::today;

/// Attendance workflow service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Staff marking
    // ========================================================================

    /// Record one member's attendance on behalf of the caller.
    ///
    /// Status defaults to present and the date to today.
    #[instrument(skip(self, caller, request), fields(member_id = %request.member_id, marked_by = %caller.id))]
    pub async fn mark(
        &self,
        caller: &User,
        request: MarkAttendanceRequest,
    ) -> ServiceResult<AttendanceResponse> {
        let date = request.attendance_date.unwrap_or_else(today);
        validate_notes(request.notes.as_deref())?;

        let member = self.find_member(request.member_id).await?;

        if self
            .ctx
            .attendance_repo()
            .exists_for(member.id, date)
            .await?
        {
            return Err(DomainError::DuplicateAttendance {
                member_id: member.id,
                date,
            }
            .into());
        }

        let attendance = Attendance::new(
            member.id,
            date,
            request.status.unwrap_or_default(),
            request.notes,
            Some(caller.id),
        );
        self.ctx.attendance_repo().create(&attendance).await?;

        info!(
            attendance_id = %attendance.id,
            date = %date,
            status = %attendance.status,
            "Attendance marked"
        );

        Ok(AttendanceResponse::from(AttendanceRecord {
            attendance,
            member_name: Some(member.display_name()),
        }))
    }

    /// Record the same status for many members in one transaction.
    ///
    /// Repeated ids are collapsed, keeping the first occurrence. Ids that do
    /// not resolve to a live member, or that already have a record for the
    /// date, are reported in `skipped` without failing the batch. If the
    /// unique index still fires during the insert, nothing is committed.
    #[instrument(skip(self, caller, request), fields(requested = request.member_ids.len(), marked_by = %caller.id))]
    pub async fn bulk_mark(
        &self,
        caller: &User,
        request: BulkMarkAttendanceRequest,
    ) -> ServiceResult<BulkAttendanceResponse> {
        let date = request.attendance_date.unwrap_or_else(today);
        let status = request.status.unwrap_or_default();
        validate_notes(request.notes.as_deref())?;

        let mut seen = HashSet::new();
        let member_ids: Vec<Uuid> = request
            .member_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let existing: HashSet<Uuid> = self
            .ctx
            .member_repo()
            .find_existing_ids(&member_ids)
            .await?
            .into_iter()
            .collect();
        let already_marked: HashSet<Uuid> = self
            .ctx
            .attendance_repo()
            .find_marked_members(&member_ids, date)
            .await?
            .into_iter()
            .collect();

        let (eligible, skipped): (Vec<Uuid>, Vec<Uuid>) = member_ids
            .into_iter()
            .partition(|id| existing.contains(id) && !already_marked.contains(id));

        let records: Vec<Attendance> = eligible
            .iter()
            .map(|member_id| {
                Attendance::new(
                    *member_id,
                    date,
                    status,
                    request.notes.clone(),
                    Some(caller.id),
                )
            })
            .collect();

        let created = if records.is_empty() {
            Vec::new()
        } else {
            self.ctx.attendance_repo().create_many(&records).await?;

            let ids: Vec<Uuid> = records.iter().map(|a| a.id).collect();
            let mut created = self.ctx.attendance_repo().find_by_ids(&ids).await?;
            created.sort_by_key(|r| ids.iter().position(|id| *id == r.attendance.id));
            created
        };

        info!(
            date = %date,
            created = created.len(),
            skipped = skipped.len(),
            "Bulk attendance marked"
        );

        Ok(BulkAttendanceResponse::new(
            created.into_iter().map(AttendanceResponse::from).collect(),
            skipped,
        ))
    }

    // ========================================================================
    // QR self check-in (public)
    // ========================================================================

    /// Step one: resolve a phone number to a member.
    ///
    /// Read-only. `already_marked_today` is informational; confirmation
    /// performs its own check.
    #[instrument(skip(self, request))]
    pub async fn lookup_by_phone(&self, request: QrLookupRequest) -> ServiceResult<QrLookupResponse> {
        let phone_number = request.phone_number.trim();

        let member = self
            .ctx
            .member_repo()
            .find_by_phone(phone_number)
            .await?
            .ok_or(DomainError::PhoneNumberNotFound)?;

        let already_marked_today = self
            .ctx
            .attendance_repo()
            .exists_for(member.id, today())
            .await?;

        Ok(QrLookupResponse {
            member_id: member.id,
            member_name: member.display_name(),
            membership_status: member.membership_status,
            already_marked_today,
        })
    }

    /// Step two: the member confirms and is checked in as present.
    ///
    /// A second confirmation for the same date, whether caught by the
    /// pre-check or by the unique index, is `AlreadyCheckedIn`.
    #[instrument(skip(self, request), fields(member_id = %request.member_id))]
    pub async fn confirm_and_mark(
        &self,
        request: QrConfirmRequest,
    ) -> ServiceResult<AttendanceResponse> {
        let date = request.attendance_date.unwrap_or_else(today);
        let member = self.find_member(request.member_id).await?;

        if self
            .ctx
            .attendance_repo()
            .exists_for(member.id, date)
            .await?
        {
            return Err(DomainError::AlreadyCheckedIn { date }.into());
        }

        let attendance = Attendance::self_check_in(member.id, date);
        match self.ctx.attendance_repo().create(&attendance).await {
            Ok(()) => {}
            Err(DomainError::DuplicateAttendance { .. }) => {
                warn!(member_id = %member.id, date = %date, "Concurrent QR check-in rejected");
                return Err(DomainError::AlreadyCheckedIn { date }.into());
            }
            Err(e) => return Err(e.into()),
        }

        info!(attendance_id = %attendance.id, date = %date, "QR self check-in recorded");

        Ok(AttendanceResponse::from(AttendanceRecord {
            attendance,
            member_name: Some(member.display_name()),
        }))
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// List live records, most recent first
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        query: AttendanceListQuery,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<AttendanceResponse>> {
        let filter = AttendanceFilter {
            member_id: query.member_id,
            attendance_date: query.attendance_date,
            status: query.status,
            from_date: query.from_date,
            to_date: query.to_date,
        };

        let records = self.ctx.attendance_repo().list(&filter, page).await?;
        Ok(PaginatedResponse::from_page(records, AttendanceResponse::from))
    }

    /// Get a live record
    #[instrument(skip(self))]
    pub async fn get(&self, attendance_id: Uuid) -> ServiceResult<AttendanceResponse> {
        let record = self.find(attendance_id).await?;
        Ok(AttendanceResponse::from(record))
    }

    /// Patch status and notes; an empty patch changes nothing
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        attendance_id: Uuid,
        request: UpdateAttendanceRequest,
    ) -> ServiceResult<AttendanceResponse> {
        let mut record = self.find(attendance_id).await?;

        let patch = AttendancePatch::from(request);
        if patch.apply(&mut record.attendance) {
            record.attendance.validate()?;
            self.ctx.attendance_repo().update(&record.attendance).await?;
            info!(attendance_id = %attendance_id, "Attendance updated");
        }

        Ok(AttendanceResponse::from(record))
    }

    /// Soft delete; returns the record as deleted
    #[instrument(skip(self))]
    pub async fn delete(&self, attendance_id: Uuid) -> ServiceResult<AttendanceResponse> {
        let mut record = self.find(attendance_id).await?;

        self.ctx.attendance_repo().delete(attendance_id).await?;
        record.attendance.mark_deleted();

        info!(attendance_id = %attendance_id, "Attendance deleted");
        Ok(AttendanceResponse::from(record))
    }

    async fn find(&self, attendance_id: Uuid) -> ServiceResult<AttendanceRecord> {
        self.ctx
            .attendance_repo()
            .find_by_id(attendance_id)
            .await?
            .ok_or_else(|| DomainError::AttendanceNotFound(attendance_id).into())
    }

    async fn find_member(&self, member_id: Uuid) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id).into())
    }
}
