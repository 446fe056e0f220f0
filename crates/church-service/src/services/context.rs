//! Service context - dependency container for services
//!
//! Holds the connection pool, the repositories, and the credential services.

use std::sync::Arc;

use church_common::{JwtService, PasswordService};
use church_core::traits::{AttendanceRepository, MemberRepository, UserRepository};
use church_db::{PgAttendanceRepository, PgMemberRepository, PgPool, PgUserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container handed to every service. It provides:
/// - the PostgreSQL pool (readiness checks)
/// - the member, user and attendance repositories
/// - JWT issuance/validation and password hashing
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    user_repo: Arc<dyn UserRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,

    // Credentials
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        member_repo: Arc<dyn MemberRepository>,
        user_repo: Arc<dyn UserRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            pool,
            member_repo,
            user_repo,
            attendance_repo,
            jwt_service,
            password_service: PasswordService::new(),
        }
    }

    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self::new(
            pool.clone(),
            Arc::new(PgMemberRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgAttendanceRepository::new(pool)),
            jwt_service,
        )
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the attendance repository
    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    attendance_repo: Option<Arc<dyn AttendanceRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            member_repo: None,
            user_repo: None,
            attendance_repo: None,
            jwt_service: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn attendance_repo(mut self, repo: Arc<dyn AttendanceRepository>) -> Self {
        self.attendance_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.attendance_repo
                .ok_or_else(|| ServiceError::validation("attendance_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
