//! User account routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use cashdesk_shared::types::UserId;
use cashdesk_store::repositories::NewUser;

use crate::extract::ActingUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/deactivate", post(deactivate_user))
}

/// POST `/users` - Create an account.
async fn create_user(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Json(input): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.create(actor, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(user)))
}

/// GET `/users` - List accounts.
async fn list_users(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.list(actor).await?;
    Ok(ApiResponse::data(users))
}

/// GET `/users/{id}` - Fetch one account.
async fn get_user(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get(actor, UserId::from_uuid(id)).await?;
    Ok(ApiResponse::data(user))
}

/// POST `/users/{id}/deactivate` - Soft-delete an account.
async fn deactivate_user(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.deactivate(actor, UserId::from_uuid(id)).await?;
    Ok(ApiResponse::with_message(user, "User deactivated"))
}

/// DELETE `/users/{id}` - Hard-delete an account.
async fn delete_user(
    State(state): State<AppState>,
    ActingUser(actor): ActingUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.delete(actor, UserId::from_uuid(id)).await?;
    Ok(ApiResponse::with_message((), "User deleted"))
}
