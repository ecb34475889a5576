//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod balance;
pub mod funds;
pub mod health;
pub mod transactions;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(transactions::routes())
        .merge(funds::routes())
        .merge(balance::routes())
        .merge(users::routes())
}
