//! Integration tests for admin user management, plans, and analytics.

mod helpers;

use http::StatusCode;
use serde_json::json;

use fithub_entity::user::UserRole;
use helpers::TestApp;

#[tokio::test]
async fn test_admin_cannot_grant_admin_but_super_admin_can() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let (_, root) = app.user_session("root@gym.test", UserRole::SuperAdmin).await;
    let target = app.create_user("ben@gym.test", UserRole::Manager).await;
    let path = format!("/api/admin/users/{target}");

    let denied = app
        .request("PUT", &path, Some(json!({ "role": "admin" })), Some(&admin))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["error"], "Access denied");

    let granted = app
        .request("PUT", &path, Some(json!({ "role": "admin" })), Some(&root))
        .await;
    assert_eq!(granted.status, StatusCode::OK);
    assert_eq!(granted.body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_admin_manages_non_admin_roles() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let target = app.create_user("cal@gym.test", UserRole::Member).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{target}"),
            Some(json!({ "role": "trainer", "name": "Cal the Coach" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "trainer");
    assert_eq!(response.body["data"]["name"], "Cal the Coach");
}

#[tokio::test]
async fn test_self_role_change_is_refused() {
    let app = TestApp::new().await;
    let (root_id, root) = app.user_session("root@gym.test", UserRole::SuperAdmin).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{root_id}"),
            Some(json!({ "role": "member" })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let deactivate = app
        .request(
            "PUT",
            &format!("/api/admin/users/{root_id}"),
            Some(json!({ "is_active": false })),
            Some(&root),
        )
        .await;
    assert_eq!(deactivate.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deactivated_user_is_locked_out() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let (target, target_cookie) = app.user_session("dan@gym.test", UserRole::Member).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{target}"),
            Some(json!({ "is_active": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_active"], false);

    let trust = app
        .request("POST", "/api/auth/device-trust", None, Some(&target_cookie))
        .await;
    assert_eq!(trust.status, StatusCode::FORBIDDEN);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "dan@gym.test", "password": helpers::PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_and_get_users() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    app.create_user("eli@gym.test", UserRole::Member).await;
    app.create_user("fin@gym.test", UserRole::Member).await;
    let trainer = app.create_user("gil@gym.test", UserRole::Trainer).await;

    let all = app.request("GET", "/api/admin/users", None, Some(&admin)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["total"], 4);
    assert!(all.body["data"]["items"][0].get("password_hash").is_none());

    let members = app
        .request("GET", "/api/admin/users?role=member&per_page=1", None, Some(&admin))
        .await;
    assert_eq!(members.body["data"]["total"], 2);
    assert_eq!(members.body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(members.body["data"]["total_pages"], 2);

    let one = app
        .request("GET", &format!("/api/admin/users/{trainer}"), None, Some(&admin))
        .await;
    assert_eq!(one.body["data"]["email"], "gil@gym.test");

    let missing = app
        .request("GET", &format!("/api/admin/users/{}", uuid::Uuid::new_v4()), None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/admin/users/not-a-uuid", None, Some(&admin))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plan_management() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;

    let created = app
        .request(
            "POST",
            "/api/admin/plans",
            Some(json!({
                "name": "Student",
                "duration_days": 30,
                "price_cents": 2900,
                "currency": "usd"
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let invalid = app
        .request(
            "POST",
            "/api/admin/plans",
            Some(json!({ "name": "", "duration_days": 0, "price_cents": -1, "currency": "US" })),
            Some(&admin),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert!(invalid.body["details"].is_object());

    let retired = app
        .request(
            "PUT",
            &format!("/api/admin/plans/{id}"),
            Some(json!({ "is_active": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(retired.status, StatusCode::OK);
    assert_eq!(retired.body["data"]["is_active"], false);

    let public = app.request("GET", "/api/plans", None, None).await;
    assert_eq!(public.body["data"].as_array().unwrap().len(), 0);

    let all = app.request("GET", "/api/admin/plans", None, Some(&admin)).await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_analytics_report() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, member) = app.user_session("hub@gym.test", UserRole::Member).await;

    let bought = app
        .request(
            "POST",
            "/api/memberships/purchase",
            Some(json!({ "plan_id": plan_id })),
            Some(&member),
        )
        .await;
    assert_eq!(bought.status, StatusCode::CREATED);

    let report = app.request("GET", "/api/admin/analytics", None, Some(&admin)).await;
    assert_eq!(report.status, StatusCode::OK);
    let data = &report.body["data"];
    assert_eq!(data["users_by_role"]["member"], 1);
    assert_eq!(data["users_by_role"]["admin"], 1);
    assert_eq!(data["memberships_by_status"]["active"], 1);
    assert_eq!(data["total_orders"], 1);
    assert_eq!(data["revenue_by_plan"][0]["total_cents"], 4900);
}

#[tokio::test]
async fn test_out_of_range_page_is_empty() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let (_, trainer) = app.user_session("ivy@gym.test", UserRole::Trainer).await;

    let users = app
        .request(
            "GET",
            "/api/admin/users?page=18446744073709551615&per_page=100",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(users.status, StatusCode::OK);
    assert_eq!(users.body["data"]["total"], 2);
    assert_eq!(users.body["data"]["items"].as_array().unwrap().len(), 0);

    let roster = app
        .request(
            "GET",
            "/api/staff/members?page=18446744073709551615",
            None,
            Some(&trainer),
        )
        .await;
    assert_eq!(roster.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_changes_refresh_cached_analytics() {
    let app = TestApp::new().await;
    let (_, admin) = app.user_session("ada@gym.test", UserRole::Admin).await;
    let target = app.create_user("cal@gym.test", UserRole::Member).await;

    let before = app.request("GET", "/api/admin/analytics", None, Some(&admin)).await;
    assert_eq!(before.body["data"]["users_by_role"]["member"], 1);
    assert_eq!(before.body["data"]["users_by_role"]["trainer"], 0);

    let updated = app
        .request(
            "PUT",
            &format!("/api/admin/users/{target}"),
            Some(json!({ "role": "trainer" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let after = app.request("GET", "/api/admin/analytics", None, Some(&admin)).await;
    assert_eq!(after.body["data"]["users_by_role"]["member"], 0);
    assert_eq!(after.body["data"]["users_by_role"]["trainer"], 1);
}
