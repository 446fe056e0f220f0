//! User model -> entity mapper

use church_core::{DomainError, User};

use super::corrupt_column;
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            username: model.username,
            full_name: model.full_name,
            role: model.role.parse().map_err(corrupt_column)?,
            is_active: model.is_active,
            must_change_password: model.must_change_password,
            is_deleted: model.is_deleted,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
