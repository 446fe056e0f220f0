//! PostgreSQL implementation of AttendanceRepository
//!
//! The partial unique index `uq_attendance_member_date` is the authoritative
//! guard against two live records for one member on one date.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use church_core::{
    Attendance, AttendanceFilter, AttendanceRecord, AttendanceRepository, DomainError, Page,
    PageRequest, RepoResult,
};

use crate::models::AttendanceRowModel;

use super::error::{map_db_error, map_unique_violation};

const RECORD_SELECT: &str = "SELECT a.id, a.member_id, a.attendance_date, a.status, \
            a.check_in_time, a.notes, a.marked_by, a.is_deleted, a.created_at, a.updated_at, \
            m.first_name, m.second_name, m.last_name \
     FROM attendance a \
     LEFT JOIN members m ON m.id = a.member_id";

const ATTENDANCE_FILTER: &str = "WHERE NOT a.is_deleted \
       AND ($1::uuid IS NULL OR a.member_id = $1) \
       AND ($2::date IS NULL OR a.attendance_date = $2) \
       AND ($3::text IS NULL OR a.status = $3) \
       AND ($4::date IS NULL OR a.attendance_date >= $4) \
       AND ($5::date IS NULL OR a.attendance_date <= $5)";

const INSERT_ATTENDANCE: &str = r"
    INSERT INTO attendance (
        id, member_id, attendance_date, status, check_in_time, notes, marked_by,
        is_deleted, created_at, updated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $9)
";

fn to_records(rows: Vec<AttendanceRowModel>) -> RepoResult<Vec<AttendanceRecord>> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    /// Create a new PgAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        attendance: &Attendance,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_ATTENDANCE)
            .bind(attendance.id)
            .bind(attendance.member_id)
            .bind(attendance.attendance_date)
            .bind(attendance.status.as_str())
            .bind(attendance.check_in_time)
            .bind(&attendance.notes)
            .bind(attendance.marked_by)
            .bind(attendance.created_at)
            .bind(attendance.updated_at)
            .execute(&mut **tx)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AttendanceRecord>> {
        let sql = format!("{RECORD_SELECT} WHERE a.id = $1 AND NOT a.is_deleted");
        let result = sqlx::query_as::<_, AttendanceRowModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(AttendanceRecord::try_from).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "{RECORD_SELECT} WHERE a.id = ANY($1) AND NOT a.is_deleted \
             ORDER BY a.check_in_time, a.id"
        );
        let rows = sqlx::query_as::<_, AttendanceRowModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        to_records(rows)
    }

    #[instrument(skip(self))]
    async fn exists_for(&self, member_id: Uuid, date: NaiveDate) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM attendance
                WHERE member_id = $1 AND attendance_date = $2 AND NOT is_deleted
            )
            ",
        )
        .bind(member_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member_ids), fields(count = member_ids.len()))]
    async fn find_marked_members(
        &self,
        member_ids: &[Uuid],
        date: NaiveDate,
    ) -> RepoResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT member_id FROM attendance
            WHERE member_id = ANY($1) AND attendance_date = $2 AND NOT is_deleted
            ",
        )
        .bind(member_ids)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, attendance), fields(attendance_id = %attendance.id, member_id = %attendance.member_id))]
    async fn create(&self, attendance: &Attendance) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::insert(&mut tx, attendance).await.map_err(|e| {
            map_unique_violation(e, |_| DomainError::DuplicateAttendance {
                member_id: attendance.member_id,
                date: attendance.attendance_date,
            })
        })?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn create_many(&self, records: &[Attendance]) -> RepoResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for attendance in records {
            // Dropping `tx` on error rolls the whole batch back
            Self::insert(&mut tx, attendance)
                .await
                .map_err(|e| map_unique_violation(e, |_| DomainError::DuplicateAttendanceBatch))?;
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!(count = records.len(), "Committed attendance batch");
        Ok(())
    }

    #[instrument(skip(self, attendance), fields(attendance_id = %attendance.id))]
    async fn update(&self, attendance: &Attendance) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE attendance
            SET status = $2, notes = $3, updated_at = $4
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(attendance.id)
        .bind(attendance.status.as_str())
        .bind(&attendance.notes)
        .bind(attendance.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AttendanceNotFound(attendance.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE attendance
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AttendanceNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> RepoResult<Page<AttendanceRecord>> {
        let status = filter.status.map(|s| s.as_str());

        let count_sql = format!("SELECT COUNT(*) FROM attendance a {ATTENDANCE_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(filter.member_id)
            .bind(filter.attendance_date)
            .bind(status)
            .bind(filter.from_date)
            .bind(filter.to_date)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let sql = format!(
            "{RECORD_SELECT} {ATTENDANCE_FILTER} \
             ORDER BY a.attendance_date DESC, a.check_in_time DESC, a.id \
             LIMIT $6 OFFSET $7"
        );
        let rows = sqlx::query_as::<_, AttendanceRowModel>(&sql)
            .bind(filter.member_id)
            .bind(filter.attendance_date)
            .bind(status)
            .bind(filter.from_date)
            .bind(filter.to_date)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(to_records(rows)?, total, page))
    }
}
