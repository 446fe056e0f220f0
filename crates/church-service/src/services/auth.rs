//! Authentication service
//!
//! Handles login, bearer token resolution, and self-service password changes.

use chrono::Utc;
use church_common::AppError;
use church_core::{DomainError, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, ChangePasswordRequest, LoginRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with username (or email) and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let identifier = request.username.trim();

        let user = self
            .ctx
            .user_repo()
            .find_by_login(identifier)
            .await?
            .ok_or_else(|| {
                warn!(username = %identifier, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self.ctx.user_repo().get_password_hash(user.id).await?;
        let is_valid = self
            .ctx
            .password_service()
            .matches(&request.password, password_hash.as_deref())?;

        if !is_valid {
            warn!(username = %identifier, user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if !user.can_sign_in() {
            warn!(user_id = %user.id, "Login refused: account inactive");
            return Err(DomainError::AccountInactive.into());
        }

        let now = Utc::now();
        self.ctx.user_repo().record_login(user.id, now).await?;

        let user = User {
            last_login: Some(now),
            ..user
        };
        let token = self.ctx.jwt_service().issue(&user)?;

        info!(user_id = %user.id, role = %user.role, "User logged in successfully");

        Ok(AuthResponse::new(
            token.token,
            token.expires_in,
            UserResponse::from(&user),
        ))
    }

    /// Resolve a bearer token to the current user.
    ///
    /// The user is reloaded on every call so that deleted or deactivated
    /// accounts lose access immediately.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if !user.can_sign_in() {
            return Err(DomainError::AccountInactive.into());
        }

        Ok(user)
    }

    /// Profile of the authenticated caller
    pub fn me(&self, caller: &User) -> UserResponse {
        UserResponse::from(caller)
    }

    /// Change the caller's own password and clear the forced-change flag
    #[instrument(skip(self, caller, request), fields(user_id = %caller.id))]
    pub async fn change_password(
        &self,
        caller: &User,
        request: ChangePasswordRequest,
    ) -> ServiceResult<UserResponse> {
        let password_hash = self.ctx.user_repo().get_password_hash(caller.id).await?;
        let is_valid = self
            .ctx
            .password_service()
            .matches(&request.current_password, password_hash.as_deref())?;

        if !is_valid {
            warn!(user_id = %caller.id, "Password change rejected: current password mismatch");
            return Err(DomainError::IncorrectPassword.into());
        }

        let new_hash = self.ctx.password_service().hash_new(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(caller.id, &new_hash, false)
            .await?;

        info!(user_id = %caller.id, "Password changed");
        Ok(UserResponse::from(&User {
            must_change_password: false,
            ..caller.clone()
        }))
    }
}
