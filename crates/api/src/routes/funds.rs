//! Fund transfer routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};
use uuid::Uuid;

use cashdesk_core::transfer::NewFundTransfer;
use cashdesk_shared::types::FundTransferId;

use crate::extract::ActingUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Creates the fund transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/funds",
            post(add_funds).get(list_transfers).delete(clear_history),
        )
        .route("/funds/{id}", delete(delete_transfer))
}

/// POST `/funds` - Record an inbound transfer and credit the balance.
async fn add_funds(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Json(input): Json<NewFundTransfer>,
) -> Result<impl IntoResponse, ApiError> {
    let transfer = state.funds.add_funds(actor, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(transfer)))
}

/// GET `/funds` - List recorded transfers.
async fn list_transfers(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<impl IntoResponse, ApiError> {
    let transfers = state.funds.list(actor).await?;
    Ok(ApiResponse::data(transfers))
}

/// DELETE `/funds/{id}` - Remove a transfer and reverse its credit.
async fn delete_transfer(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .funds
        .delete(actor, FundTransferId::from_uuid(id))
        .await?;
    Ok(ApiResponse::with_message(
        (),
        "Transfer deleted and credit reversed",
    ))
}

/// DELETE `/funds` - Purge transfer records, balance untouched.
async fn clear_history(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state.funds.clear_history(actor).await?;
    Ok(ApiResponse::with_message(
        removed,
        "Transfer history cleared; balance unchanged",
    ))
}
