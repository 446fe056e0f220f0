//! In-memory repositories for service tests.
//!
//! They honour the same contracts as the PostgreSQL adapters: soft-deleted
//! rows are invisible, and attendance enforces one live row per
//! (member, date) the way the partial unique index does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use church_common::{hash_password, JwtService};
use church_core::traits::{
    AttendanceFilter, AttendanceRepository, MemberFilter, MemberRepository, RepoResult,
    UserFilter, UserRepository,
};
use church_core::{
    Attendance, AttendanceRecord, DomainError, Gender, Member, Page, PageRequest, Role, User,
};
use church_db::PgPool;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::services::ServiceContext;

pub(crate) const TEST_PASSWORD: &str = "Secret123";

fn paginate<T: Clone>(rows: &[T], page: PageRequest) -> Page<T> {
    let items = rows
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(items, rows.len() as i64, page)
}

// ============================================================================
// Members
// ============================================================================

#[derive(Default)]
pub(crate) struct InMemoryMembers {
    rows: Mutex<Vec<Member>>,
}

impl InMemoryMembers {
    fn name_of(&self, id: Uuid) -> Option<String> {
        self.rows
            .lock()
            .iter()
            .find(|m| m.id == id)
            .map(Member::display_name)
    }
}

#[async_trait]
impl MemberRepository for InMemoryMembers {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|m| m.id == id && !m.is_deleted)
            .cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> RepoResult<Option<Member>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|m| !m.is_deleted && m.phone_number.as_deref() == Some(phone_number))
            .cloned())
    }

    async fn find_existing_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<Uuid>> {
        let rows = self.rows.lock();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| rows.iter().any(|m| m.id == *id && !m.is_deleted))
            .collect())
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        Ok(self.rows.lock().iter().any(|m| {
            !m.is_deleted
                && Some(m.id) != exclude
                && m.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
        }))
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        self.rows.lock().push(member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|m| m.id == member.id && !m.is_deleted)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        *slot = member.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|m| m.id == id && !m.is_deleted)
            .ok_or(DomainError::MemberNotFound(id))?;
        slot.mark_deleted();
        Ok(())
    }

    async fn list(&self, filter: &MemberFilter, page: PageRequest) -> RepoResult<Page<Member>> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut rows: Vec<Member> = self
            .rows
            .lock()
            .iter()
            .filter(|m| !m.is_deleted)
            .filter(|m| {
                filter
                    .membership_status
                    .is_none_or(|s| m.membership_status == s)
            })
            .filter(|m| {
                search.as_deref().is_none_or(|needle| {
                    [
                        Some(m.first_name.as_str()),
                        Some(m.last_name.as_str()),
                        m.email.as_deref(),
                        m.phone_number.as_deref(),
                    ]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(paginate(&rows, page))
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub(crate) struct InMemoryUsers {
    rows: Mutex<Vec<(User, String)>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| u.id == id && !u.is_deleted)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_login(&self, identifier: &str) -> RepoResult<Option<User>> {
        let needle = identifier.to_lowercase();
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| {
                !u.is_deleted && (u.username == needle || u.email.to_lowercase() == needle)
            })
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        Ok(self.rows.lock().iter().any(|(u, _)| {
            !u.is_deleted && Some(u.id) != exclude && u.email.eq_ignore_ascii_case(email)
        }))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|(u, _)| !u.is_deleted && u.username == username))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.rows
            .lock()
            .push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|(u, _)| u.id == user.id && !u.is_deleted)
            .ok_or(DomainError::UserNotFound(user.id))?;
        slot.0 = user.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|(u, _)| u.id == id && !u.is_deleted)
            .ok_or(DomainError::UserNotFound(id))?;
        slot.0.mark_deleted();
        Ok(())
    }

    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| u.id == id && !u.is_deleted)
            .map(|(_, h)| h.clone()))
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        must_change_password: bool,
    ) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|(u, _)| u.id == id && !u.is_deleted)
            .ok_or(DomainError::UserNotFound(id))?;
        slot.0.must_change_password = must_change_password;
        slot.1 = password_hash.to_string();
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        if let Some((u, _)) = self.rows.lock().iter_mut().find(|(u, _)| u.id == id) {
            u.last_login = Some(at);
        }
        Ok(())
    }

    async fn count_super_admins(&self) -> RepoResult<i64> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|(u, _)| !u.is_deleted && u.is_super_admin())
            .count() as i64)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.lock().iter().filter(|(u, _)| !u.is_deleted).count() as i64)
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Page<User>> {
        let mut rows: Vec<User> = self
            .rows
            .lock()
            .iter()
            .map(|(u, _)| u)
            .filter(|u| !u.is_deleted)
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| filter.is_active.is_none_or(|a| u.is_active == a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&rows, page))
    }
}

// ============================================================================
// Attendance
// ============================================================================

pub(crate) struct InMemoryAttendance {
    rows: Mutex<Vec<Attendance>>,
    members: Arc<InMemoryMembers>,
    /// When set, the read-side duplicate checks report nothing, so only the
    /// unique index can reject a duplicate
    blind_prechecks: AtomicBool,
}

impl InMemoryAttendance {
    fn new(members: Arc<InMemoryMembers>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            members,
            blind_prechecks: AtomicBool::new(false),
        }
    }

    pub(crate) fn blind_prechecks(&self) {
        self.blind_prechecks.store(true, Ordering::SeqCst);
    }

    pub(crate) fn live_rows(&self) -> Vec<Attendance> {
        self.rows
            .lock()
            .iter()
            .filter(|a| !a.is_deleted)
            .cloned()
            .collect()
    }

    fn record(&self, attendance: Attendance) -> AttendanceRecord {
        let member_name = self.members.name_of(attendance.member_id);
        AttendanceRecord {
            attendance,
            member_name,
        }
    }

    fn blind(&self) -> bool {
        self.blind_prechecks.load(Ordering::SeqCst)
    }
}

fn occupied(rows: &[Attendance], member_id: Uuid, date: NaiveDate) -> bool {
    rows.iter()
        .any(|a| !a.is_deleted && a.member_id == member_id && a.attendance_date == date)
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendance {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AttendanceRecord>> {
        let found = self
            .rows
            .lock()
            .iter()
            .find(|a| a.id == id && !a.is_deleted)
            .cloned();
        Ok(found.map(|a| self.record(a)))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<AttendanceRecord>> {
        let found: Vec<Attendance> = self
            .rows
            .lock()
            .iter()
            .filter(|a| !a.is_deleted && ids.contains(&a.id))
            .cloned()
            .collect();
        Ok(found.into_iter().map(|a| self.record(a)).collect())
    }

    async fn exists_for(&self, member_id: Uuid, date: NaiveDate) -> RepoResult<bool> {
        if self.blind() {
            return Ok(false);
        }
        Ok(occupied(&self.rows.lock(), member_id, date))
    }

    async fn find_marked_members(
        &self,
        member_ids: &[Uuid],
        date: NaiveDate,
    ) -> RepoResult<Vec<Uuid>> {
        if self.blind() {
            return Ok(Vec::new());
        }
        let rows = self.rows.lock();
        Ok(member_ids
            .iter()
            .copied()
            .filter(|id| occupied(&rows, *id, date))
            .collect())
    }

    async fn create(&self, attendance: &Attendance) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        if occupied(&rows, attendance.member_id, attendance.attendance_date) {
            return Err(DomainError::DuplicateAttendance {
                member_id: attendance.member_id,
                date: attendance.attendance_date,
            });
        }
        rows.push(attendance.clone());
        Ok(())
    }

    async fn create_many(&self, records: &[Attendance]) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let mut staged: Vec<Attendance> = Vec::with_capacity(records.len());
        for record in records {
            if occupied(&rows, record.member_id, record.attendance_date)
                || occupied(&staged, record.member_id, record.attendance_date)
            {
                return Err(DomainError::DuplicateAttendanceBatch);
            }
            staged.push(record.clone());
        }
        rows.extend(staged);
        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|a| a.id == attendance.id && !a.is_deleted)
            .ok_or(DomainError::AttendanceNotFound(attendance.id))?;
        slot.status = attendance.status;
        slot.notes.clone_from(&attendance.notes);
        slot.updated_at = attendance.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let slot = rows
            .iter_mut()
            .find(|a| a.id == id && !a.is_deleted)
            .ok_or(DomainError::AttendanceNotFound(id))?;
        slot.mark_deleted();
        Ok(())
    }

    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> RepoResult<Page<AttendanceRecord>> {
        let mut rows: Vec<Attendance> = self
            .rows
            .lock()
            .iter()
            .filter(|a| !a.is_deleted)
            .filter(|a| filter.member_id.is_none_or(|id| a.member_id == id))
            .filter(|a| filter.attendance_date.is_none_or(|d| a.attendance_date == d))
            .filter(|a| filter.status.is_none_or(|s| a.status == s))
            .filter(|a| filter.from_date.is_none_or(|d| a.attendance_date >= d))
            .filter(|a| filter.to_date.is_none_or(|d| a.attendance_date <= d))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.attendance_date
                .cmp(&a.attendance_date)
                .then(b.check_in_time.cmp(&a.check_in_time))
                .then(a.id.cmp(&b.id))
        });
        Ok(paginate(&rows, page).map(|a| self.record(a)))
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A service context wired to in-memory repositories
pub(crate) struct Harness {
    pub ctx: ServiceContext,
    pub members: Arc<InMemoryMembers>,
    pub users: Arc<InMemoryUsers>,
    pub attendance: Arc<InMemoryAttendance>,
}

impl Harness {
    /// Must run inside a Tokio runtime; the lazy pool never connects
    pub fn new() -> Self {
        let members = Arc::new(InMemoryMembers::default());
        let users = Arc::new(InMemoryUsers::default());
        let attendance = Arc::new(InMemoryAttendance::new(Arc::clone(&members)));
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();

        let ctx = ServiceContext::new(
            pool,
            members.clone(),
            users.clone(),
            attendance.clone(),
            Arc::new(JwtService::new("test-secret-key-for-services", 3600)),
        );

        Self {
            ctx,
            members,
            users,
            attendance,
        }
    }

    pub async fn add_member(&self, first: &str, last: &str, phone: Option<&str>) -> Member {
        let mut member = Member::new(
            first.to_string(),
            last.to_string(),
            NaiveDate::from_ymd_opt(1988, 5, 14).unwrap(),
            Gender::Female,
            NaiveDate::from_ymd_opt(2019, 9, 1).unwrap(),
        );
        member.phone_number = phone.map(str::to_string);
        self.members.create(&member).await.unwrap();
        member
    }

    pub async fn add_user(&self, username: &str, role: Role) -> User {
        let user = User::new(
            format!("{username}@church.test"),
            username.to_string(),
            format!("{username} tester"),
            role,
        );
        let hash = hash_password(TEST_PASSWORD).unwrap();
        self.users.create(&user, &hash).await.unwrap();
        user
    }
}
