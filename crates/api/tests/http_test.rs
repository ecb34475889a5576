//! HTTP surface tests driven through the router with `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use cashdesk_api::{create_router, AppState};
use cashdesk_shared::types::UserId;
use cashdesk_store::Store;

async fn app() -> (Router, UserId) {
    let store = Store::new(Decimal::ZERO);
    let admin = store.bootstrap_admin("Admin", "admin@example.com").await;
    (create_router(AppState::new(store)), admin.id)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: Option<UserId>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-user-id", actor.to_string());
    }
    let request = if let Some(body) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn missing_identity_header_is_unauthorized() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/balance", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_identity_is_not_found() {
    let (app, _) = app().await;
    let ghost = UserId::new();
    let (status, body) = send(&app, "GET", "/api/v1/balance", Some(ghost), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn full_expense_flow_over_http() {
    let (app, admin) = app().await;

    // Fund the pool.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/funds",
        Some(admin),
        Some(json!({ "transfer_type": "cash", "amount": "5000" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["data"]["reference"]
        .as_str()
        .unwrap()
        .starts_with("FT-"));

    // Create a pending expense.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transactions",
        Some(admin),
        Some(json!({
            "workflow": "simple",
            "category": uuid::Uuid::now_v7(),
            "pre_tax_amount": "1800",
            "tax_amount": "200",
            "post_tax_amount": "2000",
            "transaction_date": "2026-08-20",
            "payment_method": "cash",
            "payee_client_name": "Office Supplies Co",
            "purpose": "Printer paper",
            "requested_by": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["number"]
        .as_str()
        .unwrap()
        .starts_with("TXN-"));
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Approve it.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/transactions/{id}/approve"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    // The balance reflects the debit.
    let (status, body) = send(&app, "GET", "/api/v1/balance", Some(admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let current: Decimal = body["data"]["current_balance"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(current, dec!(3000));

    // Approving again is a conflict.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/transactions/{id}/approve"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn insufficient_balance_maps_to_422() {
    let (app, admin) = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/transactions",
        Some(admin),
        Some(json!({
            "workflow": "simple",
            "category": uuid::Uuid::now_v7(),
            "pre_tax_amount": "500",
            "tax_amount": "0",
            "post_tax_amount": "500",
            "transaction_date": "2026-08-20",
            "payment_method": "cash",
            "payee_client_name": "Vendor",
            "purpose": "Supplies",
            "requested_by": null
        })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/transactions/{id}/approve"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_BALANCE");

    // Nothing changed.
    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/transactions/{id}"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn rejection_requires_a_reason_over_http() {
    let (app, admin) = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/transactions",
        Some(admin),
        Some(json!({
            "workflow": "simple",
            "category": uuid::Uuid::now_v7(),
            "pre_tax_amount": "100",
            "tax_amount": "0",
            "post_tax_amount": "100",
            "transaction_date": "2026-08-20",
            "payment_method": "cash",
            "payee_client_name": "Vendor",
            "purpose": "Misc",
            "requested_by": null
        })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/transactions/{id}/reject"),
        Some(admin),
        Some(json!({ "reason": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "REJECTION_REASON_REQUIRED");
}

#[tokio::test]
async fn employees_cannot_reach_fund_endpoints() {
    let (app, admin) = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(admin),
        Some(json!({
            "name": "Emp",
            "email": "emp@example.com",
            "role": "employee",
            "manager_id": null,
            "approval_limit": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let employee: UserId = body["data"]["id"].as_str().unwrap().parse().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/funds",
        Some(employee),
        Some(json!({ "transfer_type": "cash", "amount": "100" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/v1/funds", Some(employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deactivated_users_are_locked_out() {
    let (app, admin) = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(admin),
        Some(json!({
            "name": "Emp",
            "email": "emp@example.com",
            "role": "employee",
            "manager_id": null,
            "approval_limit": null
        })),
    )
    .await;
    let employee = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/users/{employee}/deactivate"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let actor: UserId = employee.parse().unwrap();
    let (status, body) = send(&app, "GET", "/api/v1/transactions", Some(actor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "USER_INACTIVE");
}
