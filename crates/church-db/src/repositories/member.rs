//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use church_core::{
    DomainError, Member, MemberFilter, MemberRepository, Page, PageRequest, RepoResult,
};

use crate::models::MemberModel;

use super::error::{like_pattern, map_db_error, map_unique_violation};

const MEMBER_COLUMNS: &str = "id, first_name, second_name, other_names, last_name, date_of_birth, \
     gender, phone_number, email, address, membership_status, date_joined, notes, is_deleted, \
     created_at, updated_at";

const MEMBER_FILTER: &str = "WHERE NOT is_deleted \
       AND ($1::text IS NULL OR membership_status = $1) \
       AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2 \
            OR email ILIKE $2 OR phone_number ILIKE $2)";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1 AND NOT is_deleted");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_phone(&self, phone_number: &str) -> RepoResult<Option<Member>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members \
             WHERE phone_number = $1 AND NOT is_deleted \
             ORDER BY created_at \
             LIMIT 1"
        );
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_existing_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT id FROM members WHERE id = ANY($1) AND NOT is_deleted
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM members
                WHERE LOWER(email) = LOWER($1)
                  AND NOT is_deleted
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            ",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO members (
                id, first_name, second_name, other_names, last_name, date_of_birth, gender,
                phone_number, email, address, membership_status, date_joined, notes,
                is_deleted, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, FALSE, $14, $15)
            ",
        )
        .bind(member.id)
        .bind(&member.first_name)
        .bind(&member.second_name)
        .bind(&member.other_names)
        .bind(&member.last_name)
        .bind(member.date_of_birth)
        .bind(member.gender.as_str())
        .bind(&member.phone_number)
        .bind(&member.email)
        .bind(&member.address)
        .bind(member.membership_status.as_str())
        .bind(member.date_joined)
        .bind(&member.notes)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::MemberEmailExists))?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET first_name = $2, second_name = $3, other_names = $4, last_name = $5,
                date_of_birth = $6, gender = $7, phone_number = $8, email = $9, address = $10,
                membership_status = $11, date_joined = $12, notes = $13, updated_at = $14
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(member.id)
        .bind(&member.first_name)
        .bind(&member.second_name)
        .bind(&member.other_names)
        .bind(&member.last_name)
        .bind(member.date_of_birth)
        .bind(member.gender.as_str())
        .bind(&member.phone_number)
        .bind(&member.email)
        .bind(&member.address)
        .bind(member.membership_status.as_str())
        .bind(member.date_joined)
        .bind(&member.notes)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::MemberEmailExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &MemberFilter, page: PageRequest) -> RepoResult<Page<Member>> {
        let status = filter.membership_status.map(|s| s.as_str());
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let count_sql = format!("SELECT COUNT(*) FROM members {MEMBER_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(status)
            .bind(search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members {MEMBER_FILTER} \
             ORDER BY last_name, first_name, id \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(status)
            .bind(search.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let items = rows
            .into_iter()
            .map(Member::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(Page::new(items, total, page))
    }
}
