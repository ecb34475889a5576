//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - The acting-user extractor
//! - Response envelope types

pub mod extract;
pub mod response;
pub mod routes;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cashdesk_store::repositories::{
    BalanceRepository, FundTransferRepository, TransactionRepository, UserRepository,
};
use cashdesk_store::Store;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Expense transaction repository.
    pub transactions: TransactionRepository,
    /// Fund transfer repository.
    pub funds: FundTransferRepository,
    /// Balance repository.
    pub balance: BalanceRepository,
    /// User account repository.
    pub users: UserRepository,
}

impl AppState {
    /// Builds the handler state from a store handle.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            transactions: TransactionRepository::new(store.clone()),
            funds: FundTransferRepository::new(store.clone()),
            balance: BalanceRepository::new(store.clone()),
            users: UserRepository::new(store),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
