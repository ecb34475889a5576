//! Expense transaction routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use cashdesk_core::workflow::NewTransaction;
use cashdesk_shared::types::TransactionId;
use cashdesk_store::repositories::UpdateTransaction;

use crate::extract::ActingUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction).get(list_transactions))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
        .route("/transactions/{id}/submit", post(submit_transaction))
        .route("/transactions/{id}/approve", post(approve_transaction))
        .route("/transactions/{id}/reject", post(reject_transaction))
        .route("/transactions/{id}/approve-step", post(approve_step))
        .route("/transactions/{id}/reject-step", post(reject_step))
        .route("/transactions/{id}/request-info", post(request_info))
        .route("/transactions/{id}/mark-paid", post(mark_as_paid))
        .route("/reports/spending", get(spending_report))
}

// ============================================================================
// Request Types
// ============================================================================

/// Optional approval comment.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    /// Comment recorded with the approval.
    pub comment: Option<String>,
}

/// Required rejection reason.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// Why the transaction is rejected.
    pub reason: String,
}

/// Info-request message for the owner.
#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    /// What the approver needs to know.
    pub message: String,
}

/// Payout date override.
#[derive(Debug, Default, Deserialize)]
pub struct MarkPaidRequest {
    /// Date the expense was paid out; defaults to today.
    pub paid_date: Option<NaiveDate>,
}

/// Query parameters for the spending report.
#[derive(Debug, Deserialize)]
pub struct SpendingQuery {
    /// Restrict to one month, formatted `YYYYMM`.
    pub month: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/transactions` - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Json(input): Json<NewTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.transactions.create(actor, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(tx)))
}

/// GET `/transactions` - List transactions visible to the actor.
async fn list_transactions(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<impl IntoResponse, ApiError> {
    let txs = state.transactions.list_visible(actor).await?;
    Ok(ApiResponse::data(txs))
}

/// GET `/transactions/{id}` - Fetch one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state
        .transactions
        .get(actor, TransactionId::from_uuid(id))
        .await?;
    Ok(ApiResponse::data(tx))
}

/// PATCH `/transactions/{id}` - Owner/admin edit.
async fn update_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state
        .transactions
        .update(actor, TransactionId::from_uuid(id), patch)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// DELETE `/transactions/{id}` - Delete a draft.
async fn delete_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .transactions
        .delete(actor, TransactionId::from_uuid(id))
        .await?;
    Ok(ApiResponse::with_message((), "Transaction deleted"))
}

/// POST `/transactions/{id}/submit` - Submit a hierarchical draft.
async fn submit_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state
        .transactions
        .submit(actor, TransactionId::from_uuid(id))
        .await?;
    Ok(ApiResponse::data(tx))
}

/// POST `/transactions/{id}/approve` - Simple-protocol approval.
async fn approve_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    body: Option<Json<ApproveRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let tx = state
        .transactions
        .approve_simple(actor, TransactionId::from_uuid(id), comment)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// POST `/transactions/{id}/reject` - Simple-protocol rejection.
async fn reject_transaction(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state
        .transactions
        .reject_simple(actor, TransactionId::from_uuid(id), body.reason)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// POST `/transactions/{id}/approve-step` - Hierarchical step approval.
async fn approve_step(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    body: Option<Json<ApproveRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let tx = state
        .transactions
        .approve_step(actor, TransactionId::from_uuid(id), comment)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// POST `/transactions/{id}/reject-step` - Hierarchical step rejection.
async fn reject_step(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state
        .transactions
        .reject_step(actor, TransactionId::from_uuid(id), body.reason)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// POST `/transactions/{id}/request-info` - Ask the owner for details.
async fn request_info(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    Json(body): Json<InfoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state
        .transactions
        .request_info(actor, TransactionId::from_uuid(id), body.message)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// POST `/transactions/{id}/mark-paid` - Record the payout.
async fn mark_as_paid(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
    body: Option<Json<MarkPaidRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let paid_date = body.and_then(|Json(b)| b.paid_date);
    let tx = state
        .transactions
        .mark_as_paid(actor, TransactionId::from_uuid(id), paid_date)
        .await?;
    Ok(ApiResponse::data(tx))
}

/// GET `/reports/spending` - Per-category spending within the actor's scope.
async fn spending_report(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<SpendingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .transactions
        .spent_by_category(actor, query.month)
        .await?;
    Ok(ApiResponse::data(report))
}
