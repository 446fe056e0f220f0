//! OpenAPI document
//!
//! Served as JSON at `/api-docs/openapi.json` with Swagger UI at `/docs`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::{attendance, auth, health, members, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Church Management API",
        description = "Membership directory and attendance tracking"
    ),
    paths(
        health::root,
        health::health_check,
        health::readiness_check,
        auth::login,
        auth::token,
        auth::me,
        auth::change_password,
        members::create_member,
        members::list_members,
        members::get_member,
        members::update_member,
        members::delete_member,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::reset_password,
        users::delete_user,
        attendance::qr_lookup,
        attendance::qr_confirm,
        attendance::mark_attendance,
        attendance::bulk_mark_attendance,
        attendance::list_attendance,
        attendance::get_attendance,
        attendance::update_attendance,
        attendance::delete_attendance,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Banner and probes"),
        (name = "auth", description = "Sign-in and the current user"),
        (name = "members", description = "Member directory"),
        (name = "users", description = "Staff accounts (super admin only)"),
        (name = "attendance", description = "Attendance marking and QR self check-in")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT scheme referenced by protected operations
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
