//! Member model -> entity mapper

use church_core::{DomainError, Member};

use super::corrupt_column;
use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        Ok(Member {
            id: model.id,
            first_name: model.first_name,
            second_name: model.second_name,
            other_names: model.other_names,
            last_name: model.last_name,
            date_of_birth: model.date_of_birth,
            gender: model.gender.parse().map_err(corrupt_column)?,
            phone_number: model.phone_number,
            email: model.email,
            address: model.address,
            membership_status: model.membership_status.parse().map_err(corrupt_column)?,
            date_joined: model.date_joined,
            notes: model.notes,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
