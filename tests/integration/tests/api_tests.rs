//! End-to-end API tests
//!
//! Require a PostgreSQL database reachable through DATABASE_URL. Tests skip
//! themselves when it is not set.
//!
//! Run with: cargo test -p integration-tests

use church_core::Role;
use integration_tests::*;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_member(server: &TestServer, token: &str) -> MemberResponse {
    let response = server
        .post_auth("/api/v1/members", token, &CreateMemberRequest::sample())
        .await
        .expect("Failed to create member");
    assert_json(response, StatusCode::CREATED)
        .await
        .expect("Unexpected member response")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let health: serde_json::Value = assert_json(
        server.get("/health").await.expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Unexpected health body");
    assert_eq!(health["status"], "healthy");

    let ready: serde_json::Value = assert_json(
        server.get("/health/ready").await.expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Unexpected readiness body");
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["checks"]["database"], "healthy");

    let root: serde_json::Value = assert_json(
        server.get("/").await.expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Unexpected root body");
    assert_eq!(root["status"], "running");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server
        .seed_staff(Role::CallingTeam)
        .await
        .expect("Failed to seed staff");

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "username": staff.username.to_uppercase(), "password": STAFF_PASSWORD }),
        )
        .await
        .expect("Login request failed");
    let auth: AuthResponse = assert_json(response, StatusCode::OK)
        .await
        .expect("Login failed");
    assert_eq!(auth.token_type, "bearer");
    assert!(auth.expires_in > 0);
    assert_eq!(auth.user.role, "calling_team");
    assert!(auth.user.last_login.is_some());

    let me: UserResponse = assert_json(
        server
            .get_auth("/api/v1/auth/me", &auth.access_token)
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Unexpected profile");
    assert_eq!(me.id, staff.id);
}

#[tokio::test]
async fn test_token_endpoint_accepts_form() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server
        .seed_staff(Role::TextingTeam)
        .await
        .expect("Failed to seed staff");

    let response = server
        .client
        .post(format!("{}/api/v1/auth/token", server.base_url()))
        .form(&[
            ("grant_type", "password"),
            ("username", staff.username.as_str()),
            ("password", STAFF_PASSWORD),
        ])
        .send()
        .await
        .expect("Request failed");
    let auth: AuthResponse = assert_json(response, StatusCode::OK)
        .await
        .expect("Token grant failed");
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server
        .seed_staff(Role::CallingTeam)
        .await
        .expect("Failed to seed staff");

    let wrong_password = server
        .post(
            "/api/v1/auth/login",
            &json!({ "username": staff.username, "password": "Wrong-password1" }),
        )
        .await
        .expect("Request failed");
    let code = assert_error(wrong_password, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");
    assert_eq!(code, "INVALID_CREDENTIALS");

    let unknown = server
        .post(
            "/api/v1/auth/login",
            &json!({ "username": format!("ghost_{}", unique_tag()), "password": STAFF_PASSWORD }),
        )
        .await
        .expect("Request failed");
    assert_status(unknown, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");
}

#[tokio::test]
async fn test_protected_routes_need_a_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/api/v1/members", "/api/v1/users", "/api/v1/attendance"] {
        let response = server.get(path).await.expect("Request failed");
        let code = assert_error(response, StatusCode::UNAUTHORIZED)
            .await
            .expect("Expected 401");
        assert_eq!(code, "MISSING_AUTHORIZATION");
    }
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::CallingTeam)
        .await
        .expect("Failed to login");

    let member = create_member(&server, &token).await;
    assert_eq!(member.first_name, "Ruth");
    assert_eq!(member.membership_status, "active");

    let path = format!("/api/v1/members/{}", member.id);
    let updated: MemberResponse = assert_json(
        server
            .put_auth(&path, &token, &json!({ "membershipStatus": "inactive" }))
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Update failed");
    assert_eq!(updated.membership_status, "inactive");
    assert_eq!(updated.phone_number, member.phone_number);

    let deleted: MemberResponse = assert_json(
        server.delete_auth(&path, &token).await.expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Delete failed");
    assert!(deleted.is_deleted);

    let code = assert_error(
        server.get_auth(&path, &token).await.expect("Request failed"),
        StatusCode::NOT_FOUND,
    )
    .await
    .expect("Expected 404");
    assert_eq!(code, "UNKNOWN_MEMBER");
}

#[tokio::test]
async fn test_member_validation_and_email_conflict() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::SuperAdmin)
        .await
        .expect("Failed to login");

    let mut future_birth = CreateMemberRequest::sample();
    future_birth.date_of_birth = chrono::Utc::now().date_naive() + chrono::Duration::days(2);
    let response = server
        .post_auth("/api/v1/members", &token, &future_birth)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");

    let first = CreateMemberRequest::sample();
    create_response_ok(&server, &token, &first).await;

    let mut duplicate = CreateMemberRequest::sample();
    duplicate.email = first.email.as_ref().map(|e| e.to_uppercase());
    let code = assert_error(
        server
            .post_auth("/api/v1/members", &token, &duplicate)
            .await
            .expect("Request failed"),
        StatusCode::CONFLICT,
    )
    .await
    .expect("Expected 409");
    assert_eq!(code, "MEMBER_EMAIL_EXISTS");
}

async fn create_response_ok(server: &TestServer, token: &str, request: &CreateMemberRequest) {
    let response = server
        .post_auth("/api/v1/members", token, request)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED)
        .await
        .expect("Expected 201");
}

#[tokio::test]
async fn test_member_pagination_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::CallingTeam)
        .await
        .expect("Failed to login");

    create_member(&server, &token).await;
    create_member(&server, &token).await;

    let page: PaginatedResponse<MemberResponse> = assert_json(
        server
            .get_auth("/api/v1/members?page=1&pageSize=1", &token)
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("List failed");
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.items.len(), 1);
    assert!(page.total >= 2);
    assert!(page.total_pages >= 2);

    for query in ["pageSize=0", "page=0", "pageSize=1000"] {
        let response = server
            .get_auth(&format!("/api/v1/members?{query}"), &token)
            .await
            .expect("Request failed");
        assert_status(response, StatusCode::BAD_REQUEST)
            .await
            .expect("Expected 400");
    }
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
async fn test_mark_attendance_once_per_day() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server
        .seed_staff(Role::CallingTeam)
        .await
        .expect("Failed to seed staff");
    let token = login(&server, &staff.username).await;
    let member = create_member(&server, &token).await;

    let request = MarkAttendanceRequest {
        member_id: member.id,
        status: Some("late".to_string()),
        attendance_date: None,
        notes: Some("arrived after the first hymn".to_string()),
    };
    let record: AttendanceResponse = assert_json(
        server
            .post_auth("/api/v1/attendance", &token, &request)
            .await
            .expect("Request failed"),
        StatusCode::CREATED,
    )
    .await
    .expect("Mark failed");
    assert_eq!(record.member_id, member.id);
    assert_eq!(record.status, "late");
    assert_eq!(record.marked_by, Some(staff.id));
    assert_eq!(record.notes.as_deref(), Some("arrived after the first hymn"));
    assert!(record.member_name.is_some());

    let code = assert_error(
        server
            .post_auth("/api/v1/attendance", &token, &request)
            .await
            .expect("Request failed"),
        StatusCode::CONFLICT,
    )
    .await
    .expect("Expected 409");
    assert_eq!(code, "DUPLICATE_ATTENDANCE");

    let path = format!("/api/v1/attendance/{}", record.id);
    let updated: AttendanceResponse = assert_json(
        server
            .put_auth(&path, &token, &json!({ "status": "present" }))
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Update failed");
    assert_eq!(updated.status, "present");

    let deleted: AttendanceResponse = assert_json(
        server.delete_auth(&path, &token).await.expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Delete failed");
    assert!(deleted.is_deleted);

    // The day is free again once the record is deleted
    let response = server
        .post_auth("/api/v1/attendance", &token, &request)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED)
        .await
        .expect("Expected 201");
}

async fn login(server: &TestServer, username: &str) -> String {
    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "username": username, "password": STAFF_PASSWORD }),
        )
        .await
        .expect("Login request failed");
    let auth: AuthResponse = assert_json(response, StatusCode::OK)
        .await
        .expect("Login failed");
    auth.access_token
}

#[tokio::test]
async fn test_mark_attendance_for_unknown_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::CallingTeam)
        .await
        .expect("Failed to login");

    let request = MarkAttendanceRequest {
        member_id: Uuid::new_v4(),
        status: None,
        attendance_date: None,
        notes: None,
    };
    assert_status(
        server
            .post_auth("/api/v1/attendance", &token, &request)
            .await
            .expect("Request failed"),
        StatusCode::NOT_FOUND,
    )
    .await
    .expect("Expected 404");
}

#[tokio::test]
async fn test_bulk_mark_skips_recorded_and_unknown() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::SuperAdmin)
        .await
        .expect("Failed to login");

    let first = create_member(&server, &token).await;
    let second = create_member(&server, &token).await;
    let unknown = Uuid::new_v4();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 2).expect("valid date");

    let single = MarkAttendanceRequest {
        member_id: first.id,
        status: None,
        attendance_date: Some(date),
        notes: None,
    };
    assert_status(
        server
            .post_auth("/api/v1/attendance", &token, &single)
            .await
            .expect("Request failed"),
        StatusCode::CREATED,
    )
    .await
    .expect("Expected 201");

    let bulk = BulkMarkAttendanceRequest {
        member_ids: vec![first.id, second.id, unknown, second.id],
        status: Some("present".to_string()),
        attendance_date: Some(date),
    };
    let result: BulkAttendanceResponse = assert_json(
        server
            .post_auth("/api/v1/attendance/bulk", &token, &bulk)
            .await
            .expect("Request failed"),
        StatusCode::CREATED,
    )
    .await
    .expect("Bulk mark failed");

    assert_eq!(result.total_created, 1);
    assert_eq!(result.created[0].member_id, second.id);
    assert_eq!(result.total_skipped, 2);
    assert!(result.skipped.contains(&first.id));
    assert!(result.skipped.contains(&unknown));

    let listed: PaginatedResponse<AttendanceResponse> = assert_json(
        server
            .get_auth(
                &format!("/api/v1/attendance?memberId={}&attendanceDate={date}", second.id),
                &token,
            )
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("List failed");
    assert_eq!(listed.total, 1);
    assert_eq!(listed.items[0].attendance_date, date);
}

#[tokio::test]
async fn test_empty_bulk_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::CallingTeam)
        .await
        .expect("Failed to login");

    let bulk = BulkMarkAttendanceRequest {
        member_ids: Vec::new(),
        status: None,
        attendance_date: None,
    };
    assert_status(
        server
            .post_auth("/api/v1/attendance/bulk", &token, &bulk)
            .await
            .expect("Request failed"),
        StatusCode::BAD_REQUEST,
    )
    .await
    .expect("Expected 400");
}

#[tokio::test]
async fn test_qr_check_in_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::CallingTeam)
        .await
        .expect("Failed to login");
    let member = create_member(&server, &token).await;
    let phone = member.phone_number.clone().expect("sample has a phone");

    let lookup: QrLookupResponse = assert_json(
        server
            .post(
                "/api/v1/attendance/qr/lookup",
                &json!({ "phoneNumber": format!("  {phone} ") }),
            )
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Lookup failed");
    assert_eq!(lookup.member_id, member.id);
    assert!(lookup.member_name.contains("Ruth"));
    assert!(!lookup.already_marked_today);

    let confirm = json!({ "memberId": member.id });
    let record: AttendanceResponse = assert_json(
        server
            .post("/api/v1/attendance/qr/confirm", &confirm)
            .await
            .expect("Request failed"),
        StatusCode::CREATED,
    )
    .await
    .expect("Confirm failed");
    assert_eq!(record.status, "present");
    assert_eq!(record.marked_by, None);
    assert!(record.notes.is_some());

    let code = assert_error(
        server
            .post("/api/v1/attendance/qr/confirm", &confirm)
            .await
            .expect("Request failed"),
        StatusCode::CONFLICT,
    )
    .await
    .expect("Expected 409");
    assert_eq!(code, "ALREADY_CHECKED_IN");

    let again: QrLookupResponse = assert_json(
        server
            .post("/api/v1/attendance/qr/lookup", &json!({ "phoneNumber": phone }))
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Lookup failed");
    assert!(again.already_marked_today);
}

#[tokio::test]
async fn test_qr_lookup_unknown_phone() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let code = assert_error(
        server
            .post(
                "/api/v1/attendance/qr/lookup",
                &json!({ "phoneNumber": unique_phone() }),
            )
            .await
            .expect("Request failed"),
        StatusCode::NOT_FOUND,
    )
    .await
    .expect("Expected 404");
    assert_eq!(code, "UNKNOWN_PHONE_NUMBER");
}

// ============================================================================
// Access Policy Tests
// ============================================================================

#[tokio::test]
async fn test_texting_team_cannot_touch_attendance_or_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::TextingTeam)
        .await
        .expect("Failed to login");

    // Members are open to every active role
    let member = create_member(&server, &token).await;

    let mark = MarkAttendanceRequest {
        member_id: member.id,
        status: None,
        attendance_date: None,
        notes: None,
    };
    let code = assert_error(
        server
            .post_auth("/api/v1/attendance", &token, &mark)
            .await
            .expect("Request failed"),
        StatusCode::FORBIDDEN,
    )
    .await
    .expect("Expected 403");
    assert_eq!(code, "MISSING_PERMISSIONS");

    assert_status(
        server
            .get_auth("/api/v1/users", &token)
            .await
            .expect("Request failed"),
        StatusCode::FORBIDDEN,
    )
    .await
    .expect("Expected 403");
}

#[tokio::test]
async fn test_super_admin_manages_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .login_as(Role::SuperAdmin)
        .await
        .expect("Failed to login");

    let tag = unique_tag();
    let created: UserResponse = assert_json(
        server
            .post_auth(
                "/api/v1/users",
                &token,
                &json!({
                    "email": format!("caller_{tag}@church.test"),
                    "username": format!("Caller_{tag}"),
                    "fullName": "New Caller",
                    "password": STAFF_PASSWORD,
                    "role": "calling_team",
                }),
            )
            .await
            .expect("Request failed"),
        StatusCode::CREATED,
    )
    .await
    .expect("Create user failed");
    assert_eq!(created.username, format!("caller_{tag}"));
    assert_eq!(created.role, "calling_team");
    assert!(created.must_change_password);

    // New users can sign in and work straight away
    let caller_token = login(&server, &created.username).await;
    let me: UserResponse = assert_json(
        server
            .get_auth("/api/v1/auth/me", &caller_token)
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Unexpected profile");
    assert_eq!(me.email, created.email);

    let path = format!("/api/v1/users/{}", created.id);
    let deactivated: UserResponse = assert_json(
        server
            .put_auth(&path, &token, &json!({ "isActive": false }))
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Update failed");
    assert!(!deactivated.is_active);

    let code = assert_error(
        server
            .get_auth("/api/v1/auth/me", &caller_token)
            .await
            .expect("Request failed"),
        StatusCode::FORBIDDEN,
    )
    .await
    .expect("Expected 403");
    assert_eq!(code, "ACCOUNT_INACTIVE");

    let deleted: UserResponse = assert_json(
        server.delete_auth(&path, &token).await.expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Delete failed");
    assert!(deleted.is_deleted);
}

#[tokio::test]
async fn test_change_password_clears_flag() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server
        .seed_staff(Role::TextingTeam)
        .await
        .expect("Failed to seed staff");
    let token = login(&server, &staff.username).await;

    let updated: UserResponse = assert_json(
        server
            .post_auth(
                "/api/v1/auth/change-password",
                &token,
                &json!({ "currentPassword": STAFF_PASSWORD, "newPassword": "Brand-new-pass9" }),
            )
            .await
            .expect("Request failed"),
        StatusCode::OK,
    )
    .await
    .expect("Change password failed");
    assert!(!updated.must_change_password);

    let old = server
        .post(
            "/api/v1/auth/login",
            &json!({ "username": staff.username, "password": STAFF_PASSWORD }),
        )
        .await
        .expect("Request failed");
    assert_status(old, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");
}
