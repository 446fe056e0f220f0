//! User directory service
//!
//! Super-admin managed staff accounts, password resets, and the startup
//! default-admin seed.

use church_common::DefaultAdminConfig;
use church_core::{
    normalize_username, DomainError, PageRequest, Role, User, UserFilter, UserPatch,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    CreateUserRequest, PaginatedResponse, ResetPasswordRequest, UpdateUserRequest, UserListQuery,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User directory service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a staff user who must change the initial password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        let username = normalize_username(&request.username)?;
        let email = request.email.trim().to_string();

        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&email, None).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash_new(&request.password)?;

        let user = User::new(
            email,
            username,
            request.full_name.trim().to_string(),
            request.role.unwrap_or_default(),
        );
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(UserResponse::from(&user))
    }

    /// Get a live user
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Uuid) -> ServiceResult<UserResponse> {
        let user = self.find(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Apply a partial update.
    ///
    /// Demoting the only remaining super admin is refused.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.find(user_id).await?;
        let patch = UserPatch::from(request);

        if let Some(role) = patch.role {
            if user.is_super_admin() && role != Role::SuperAdmin {
                self.ensure_not_last_super_admin().await?;
            }
        }

        if let Some(email) = &patch.email {
            if !email.eq_ignore_ascii_case(&user.email)
                && self
                    .ctx
                    .user_repo()
                    .email_exists(email, Some(user.id))
                    .await?
            {
                return Err(DomainError::EmailAlreadyExists.into());
            }
        }

        if patch.apply(&mut user) {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user.id, "User updated");
        }

        Ok(UserResponse::from(&user))
    }

    /// Soft delete and deactivate; the last super admin cannot be deleted
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid) -> ServiceResult<UserResponse> {
        let mut user = self.find(user_id).await?;

        if user.is_super_admin() {
            self.ensure_not_last_super_admin().await?;
        }

        self.ctx.user_repo().delete(user_id).await?;
        user.mark_deleted();

        info!(user_id = %user_id, "User deleted");
        Ok(UserResponse::from(&user))
    }

    /// Set a new password chosen by an admin; the user must change it again
    #[instrument(skip(self, request))]
    pub async fn reset_password(
        &self,
        user_id: Uuid,
        request: ResetPasswordRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.find(user_id).await?;

        let password_hash = self.ctx.password_service().hash_new(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user.id, &password_hash, true)
            .await?;
        user.must_change_password = true;

        info!(user_id = %user.id, "Password reset by admin");
        Ok(UserResponse::from(&user))
    }

    /// List live users, newest first
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        query: UserListQuery,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<UserResponse>> {
        let filter = UserFilter {
            role: query.role,
            is_active: query.is_active,
        };

        let users = self.ctx.user_repo().list(&filter, page).await?;
        Ok(PaginatedResponse::from_page(users, UserResponse::from))
    }

    /// Seed the configured super admin when no user exists yet.
    ///
    /// Safe to call on every startup; returns the created user, if any.
    #[instrument(skip(self, config), fields(username = %config.username))]
    pub async fn ensure_default_admin(
        &self,
        config: &DefaultAdminConfig,
    ) -> ServiceResult<Option<UserResponse>> {
        if !config.enabled {
            return Ok(None);
        }
        if self.ctx.user_repo().count().await? > 0 {
            return Ok(None);
        }

        let username = normalize_username(&config.username)?;
        let password_hash = self.ctx.password_service().hash_new(&config.password)?;

        let user = User::new(
            config.email.trim().to_string(),
            username,
            config.full_name.clone(),
            Role::SuperAdmin,
        );
        self.ctx.user_repo().create(&user, &password_hash).await?;

        warn!(
            user_id = %user.id,
            username = %user.username,
            "Default super admin created; change its password after first login"
        );
        Ok(Some(UserResponse::from(&user)))
    }

    async fn find(&self, user_id: Uuid) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    async fn ensure_not_last_super_admin(&self) -> ServiceResult<()> {
        if self.ctx.user_repo().count_super_admins().await? <= 1 {
            return Err(DomainError::LastSuperAdmin.into());
        }
        Ok(())
    }
}
