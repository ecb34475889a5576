//! Balance route.

use axum::{extract::State, response::IntoResponse, routing::get, Router};

use crate::extract::ActingUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Creates the balance route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/balance", get(get_balance))
}

/// GET `/balance` - The current pool balance.
async fn get_balance(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<impl IntoResponse, ApiError> {
    let balance = state.balance.get(actor).await?;
    Ok(ApiResponse::data(balance))
}
