//! Integration tests for the membership lifecycle over HTTP.

mod helpers;

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use fithub_database::repositories::MembershipRepository;
use fithub_entity::user::UserRole;
use helpers::TestApp;

fn date(value: &Value) -> DateTime<Utc> {
    serde_json::from_value(value.clone()).expect("timestamp")
}

async fn purchase(app: &TestApp, cookie: &str, plan_id: Uuid) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/memberships/purchase",
        Some(json!({ "plan_id": plan_id, "payment_reference": "pay_123" })),
        Some(cookie),
    )
    .await
}

#[tokio::test]
async fn test_purchase_then_second_purchase_conflicts() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, cookie) = app.user_session("mia@gym.test", UserRole::Member).await;

    let first = purchase(&app, &cookie, plan_id).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let membership = &first.body["data"]["membership"];
    assert_eq!(membership["status"], "active");
    assert_eq!(membership["plan_name"], "Monthly");
    let days = (date(&membership["end_date"]) - date(&membership["start_date"])).num_days();
    assert_eq!(days, 30);

    let order = &first.body["data"]["order"];
    assert_eq!(order["kind"], "purchase");
    assert_eq!(order["status"], "paid");
    assert_eq!(order["amount_cents"], 4900);
    assert_eq!(order["payment_reference"], "pay_123");

    let second = purchase(&app, &cookie, plan_id).await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let overview = app
        .request("GET", "/api/memberships/me", None, Some(&cookie))
        .await;
    assert_eq!(overview.status, StatusCode::OK);
    assert_eq!(overview.body["data"]["history"].as_array().unwrap().len(), 1);
    assert_eq!(overview.body["data"]["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_purchase_unknown_plan_is_not_found() {
    let app = TestApp::new().await;
    let (_, cookie) = app.user_session("nia@gym.test", UserRole::Member).await;

    let response = purchase(&app, &cookie, Uuid::new_v4()).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_twice_conflicts() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, cookie) = app.user_session("oli@gym.test", UserRole::Member).await;

    let bought = purchase(&app, &cookie, plan_id).await;
    let id = bought.body["data"]["membership"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/memberships/{id}/cancel");

    let first = app.request("POST", &path, None, Some(&cookie)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["status"], "cancelled");
    assert!(!first.body["data"]["cancelled_at"].is_null());

    let second = app.request("POST", &path, None, Some(&cookie)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    // A cancelled membership no longer blocks a new purchase.
    let again = purchase(&app, &cookie, plan_id).await;
    assert_eq!(again.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_freeze_extends_end_date() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, cookie) = app.user_session("pia@gym.test", UserRole::Member).await;

    let bought = purchase(&app, &cookie, plan_id).await;
    let membership = &bought.body["data"]["membership"];
    let id = membership["id"].as_str().unwrap().to_string();
    let end_before = date(&membership["end_date"]);

    let path = format!("/api/memberships/{id}/freeze");
    let frozen = app
        .request("POST", &path, Some(json!({ "days": 7 })), Some(&cookie))
        .await;
    assert_eq!(frozen.status, StatusCode::OK);
    assert_eq!(frozen.body["data"]["is_frozen"], true);
    assert_eq!(date(&frozen.body["data"]["end_date"]) - end_before, Duration::days(7));

    let twice = app
        .request("POST", &path, Some(json!({ "days": 3 })), Some(&cookie))
        .await;
    assert_eq!(twice.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_freeze_rejects_out_of_range_days() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, cookie) = app.user_session("quin@gym.test", UserRole::Member).await;

    let bought = purchase(&app, &cookie, plan_id).await;
    let id = bought.body["data"]["membership"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/memberships/{id}/freeze");

    for days in [0, 365] {
        let response = app
            .request("POST", &path, Some(json!({ "days": days })), Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "days={days}");
    }
}

#[tokio::test]
async fn test_renew_restarts_expired_membership() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, cookie) = app.user_session("rae@gym.test", UserRole::Member).await;

    let bought = purchase(&app, &cookie, plan_id).await;
    let id: Uuid = bought.body["data"]["membership"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    // Age the membership past its end date.
    let mut stored = app.repos.memberships.find_by_id(id).await.unwrap().unwrap();
    stored.start_date = Utc::now() - Duration::days(40);
    stored.end_date = Utc::now() - Duration::days(10);
    app.repos.memberships.update(&stored).await.unwrap();

    let overview = app
        .request("GET", "/api/memberships/me", None, Some(&cookie))
        .await;
    assert!(overview.body["data"]["current"].is_null());

    let renewed = app
        .request(
            "POST",
            &format!("/api/memberships/{id}/renew"),
            Some(json!({})),
            Some(&cookie),
        )
        .await;
    assert_eq!(renewed.status, StatusCode::OK);
    let membership = &renewed.body["data"]["membership"];
    assert_eq!(membership["status"], "active");
    assert!(date(&membership["start_date"]) > Utc::now() - Duration::minutes(1));
    assert!(date(&membership["end_date"]) > Utc::now() + Duration::days(29));
    assert_eq!(renewed.body["data"]["order"]["kind"], "renewal");
}

#[tokio::test]
async fn test_renew_active_extends_period() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, cookie) = app.user_session("sol@gym.test", UserRole::Member).await;

    let bought = purchase(&app, &cookie, plan_id).await;
    let membership = &bought.body["data"]["membership"];
    let id = membership["id"].as_str().unwrap().to_string();
    let end_before = date(&membership["end_date"]);

    let renewed = app
        .request(
            "POST",
            &format!("/api/memberships/{id}/renew"),
            Some(json!({ "payment_reference": "pay_456" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(renewed.status, StatusCode::OK);
    assert_eq!(
        date(&renewed.body["data"]["membership"]["end_date"]) - end_before,
        Duration::days(30)
    );
}

#[tokio::test]
async fn test_other_members_cannot_touch_membership_but_staff_can() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, owner) = app.user_session("tia@gym.test", UserRole::Member).await;
    let (_, stranger) = app.user_session("uma@gym.test", UserRole::Member).await;
    let (_, manager) = app.user_session("vic@gym.test", UserRole::Manager).await;

    let bought = purchase(&app, &owner, plan_id).await;
    let id = bought.body["data"]["membership"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/memberships/{id}/cancel");

    let denied = app.request("POST", &path, None, Some(&stranger)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let allowed = app.request("POST", &path, None, Some(&manager)).await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_member_dashboard_and_staff_roster() {
    let app = TestApp::new().await;
    let plan_id = app.create_plan("Monthly", 30).await;
    let (_, member) = app.user_session("wes@gym.test", UserRole::Member).await;
    let (_, trainer) = app.user_session("xan@gym.test", UserRole::Trainer).await;
    purchase(&app, &member, plan_id).await;

    let dashboard = app
        .request("GET", "/api/member/dashboard", None, Some(&member))
        .await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert_eq!(dashboard.body["data"]["membership"]["status"], "active");
    assert_eq!(dashboard.body["data"]["recent_orders"].as_array().unwrap().len(), 1);

    let roster = app
        .request("GET", "/api/staff/members", None, Some(&trainer))
        .await;
    assert_eq!(roster.status, StatusCode::OK);
    assert_eq!(roster.body["data"]["total"], 1);
    assert_eq!(roster.body["data"]["items"][0]["user"]["email"], "wes@gym.test");
}

#[tokio::test]
async fn test_public_plan_catalogue() {
    let app = TestApp::new().await;
    app.create_plan("Monthly", 30).await;
    app.create_plan("Annual", 365).await;

    let response = app.request("GET", "/api/plans", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);
}
