//! Integration tests for the member, staff, and admin role gates.

mod helpers;

use http::StatusCode;

use fithub_entity::user::UserRole;
use helpers::TestApp;

const MEMBER_AREA: &str = "/api/member/dashboard";
const STAFF_AREA: &str = "/api/staff/dashboard";
const ADMIN_AREA: &str = "/api/admin/analytics";

/// Expected outcome per role for (member, staff, admin) areas.
fn expected(role: UserRole) -> [StatusCode; 3] {
    use StatusCode as S;
    match role {
        UserRole::Member => [S::OK, S::FORBIDDEN, S::FORBIDDEN],
        UserRole::Trainer | UserRole::Manager => [S::FORBIDDEN, S::OK, S::FORBIDDEN],
        UserRole::Admin => [S::FORBIDDEN, S::OK, S::OK],
        UserRole::SuperAdmin => [S::FORBIDDEN, S::OK, S::OK],
    }
}

#[tokio::test]
async fn test_every_role_against_every_gate() {
    let app = TestApp::new().await;

    for (i, role) in [
        UserRole::Member,
        UserRole::Trainer,
        UserRole::Manager,
        UserRole::Admin,
        UserRole::SuperAdmin,
    ]
    .into_iter()
    .enumerate()
    {
        let (_, cookie) = app.user_session(&format!("user{i}@gym.test"), role).await;

        for (path, want) in [MEMBER_AREA, STAFF_AREA, ADMIN_AREA]
            .into_iter()
            .zip(expected(role))
        {
            let response = app.request("GET", path, None, Some(&cookie)).await;
            assert_eq!(response.status, want, "{role} on {path}");
            if want == StatusCode::FORBIDDEN {
                assert_eq!(response.body["error"], "Access denied");
            }
        }
    }
}

#[tokio::test]
async fn test_gates_require_a_session() {
    let app = TestApp::new().await;

    for path in [MEMBER_AREA, STAFF_AREA, ADMIN_AREA, "/api/staff/members", "/api/admin/users"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.error_code(), Some("UNAUTHORIZED"));
    }
}

#[tokio::test]
async fn test_forged_role_cookie_is_ignored() {
    let app = TestApp::new().await;
    let (_, cookie) = app.user_session("sneaky@gym.test", UserRole::Member).await;

    let tampered = cookie.replace("user_role=member", "user_role=admin");
    let response = app.request("GET", ADMIN_AREA, None, Some(&tampered)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_change_takes_effect_on_next_login() {
    let app = TestApp::new().await;
    let (_, root) = app.user_session("root@gym.test", UserRole::SuperAdmin).await;
    let (member_id, old_cookie) = app.user_session("promo@gym.test", UserRole::Member).await;

    let update = app
        .request(
            "PUT",
            &format!("/api/admin/users/{member_id}"),
            Some(serde_json::json!({ "role": "trainer" })),
            Some(&root),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    // A token issued for the previous role no longer authenticates.
    let stale = app.request("GET", STAFF_AREA, None, Some(&old_cookie)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    let stale = app.request("GET", MEMBER_AREA, None, Some(&old_cookie)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let fresh = app.login("promo@gym.test").await;
    let response = app.request("GET", STAFF_AREA, None, Some(&fresh)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_demoted_admin_loses_admin_area() {
    let app = TestApp::new().await;
    let (_, root) = app.user_session("root@gym.test", UserRole::SuperAdmin).await;
    let (admin_id, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    assert_eq!(app.request("GET", ADMIN_AREA, None, Some(&admin)).await.status, StatusCode::OK);

    let update = app
        .request(
            "PUT",
            &format!("/api/admin/users/{admin_id}"),
            Some(serde_json::json!({ "role": "manager" })),
            Some(&root),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    let denied = app.request("GET", ADMIN_AREA, None, Some(&admin)).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);
    let profile = app.request("GET", "/api/auth/session", None, Some(&admin)).await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_account_session_is_refused() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let (member_id, member) = app.user_session("hub@gym.test", UserRole::Member).await;
    assert_eq!(app.request("GET", MEMBER_AREA, None, Some(&member)).await.status, StatusCode::OK);

    let update = app
        .request(
            "PUT",
            &format!("/api/admin/users/{member_id}"),
            Some(serde_json::json!({ "is_active": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    let gated = app.request("GET", MEMBER_AREA, None, Some(&member)).await;
    assert_eq!(gated.status, StatusCode::FORBIDDEN);
    assert_eq!(gated.body["error"], "Account is disabled");
    let profile = app.request("GET", "/api/auth/session", None, Some(&member)).await;
    assert_eq!(profile.status, StatusCode::FORBIDDEN);
}
