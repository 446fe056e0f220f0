//! Member directory service
//!
//! Create, read, patch, soft-delete and list church members.

use church_core::{DomainError, Member, MemberFilter, MemberPatch, PageRequest};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CreateMemberRequest, MemberListQuery, MemberResponse, PaginatedResponse, UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::today;

/// Member directory service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a member; email must be unused among live members
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateMemberRequest) -> ServiceResult<MemberResponse> {
        let mut member = Member::new(
            request.first_name,
            request.last_name,
            request.date_of_birth,
            request.gender,
            request.date_joined,
        );
        member.second_name = request.second_name;
        member.other_names = request.other_names;
        member.phone_number = request.phone_number;
        member.email = request.email;
        member.address = request.address;
        member.membership_status = request.membership_status.unwrap_or_default();
        member.notes = request.notes;

        member.normalize();
        member.validate(today())?;

        if let Some(email) = &member.email {
            if self.ctx.member_repo().email_exists(email, None).await? {
                return Err(DomainError::MemberEmailExists.into());
            }
        }

        self.ctx.member_repo().create(&member).await?;

        info!(member_id = %member.id, "Member created");
        Ok(MemberResponse::from(&member))
    }

    /// Get a live member
    #[instrument(skip(self))]
    pub async fn get(&self, member_id: Uuid) -> ServiceResult<MemberResponse> {
        let member = self.find(member_id).await?;
        Ok(MemberResponse::from(&member))
    }

    /// Apply a partial update.
    ///
    /// An empty patch returns the member untouched. The patched member is
    /// validated again, and the email uniqueness check re-runs only when the
    /// email changed.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        member_id: Uuid,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let mut member = self.find(member_id).await?;
        let previous_email = member.email.clone();

        let patch = MemberPatch::from(request);
        if !patch.apply(&mut member) {
            return Ok(MemberResponse::from(&member));
        }

        member.normalize();
        member.validate(today())?;

        if let Some(email) = &member.email {
            let changed = previous_email
                .as_deref()
                .is_none_or(|prev| !prev.eq_ignore_ascii_case(email));
            if changed
                && self
                    .ctx
                    .member_repo()
                    .email_exists(email, Some(member.id))
                    .await?
            {
                return Err(DomainError::MemberEmailExists.into());
            }
        }

        self.ctx.member_repo().update(&member).await?;

        info!(member_id = %member.id, "Member updated");
        Ok(MemberResponse::from(&member))
    }

    /// Soft delete; returns the member as deleted
    #[instrument(skip(self))]
    pub async fn delete(&self, member_id: Uuid) -> ServiceResult<MemberResponse> {
        let mut member = self.find(member_id).await?;

        self.ctx.member_repo().delete(member_id).await?;
        member.mark_deleted();

        info!(member_id = %member_id, "Member deleted");
        Ok(MemberResponse::from(&member))
    }

    /// List live members ordered by last name, then first name
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        query: MemberListQuery,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<MemberResponse>> {
        let filter = MemberFilter {
            membership_status: query.membership_status,
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let members = self.ctx.member_repo().list(&filter, page).await?;
        Ok(PaginatedResponse::from_page(members, MemberResponse::from))
    }

    async fn find(&self, member_id: Uuid) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id).into())
    }
}
