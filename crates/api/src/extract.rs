//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::str::FromStr;

use cashdesk_shared::types::UserId;
use cashdesk_shared::AppError;

use crate::response::ApiError;

/// Header naming the acting user.
///
/// Authentication proper (sessions, tokens) is a deployment concern in
/// front of this service; the API trusts the id and the store refuses
/// unknown or deactivated accounts.
pub const USER_HEADER: &str = "x-user-id";

/// Extractor for the acting user's id.
#[derive(Debug, Clone, Copy)]
pub struct ActingUser(pub UserId);

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                ApiError::from(AppError::Unauthorized(format!(
                    "{USER_HEADER} header is required"
                )))
            })?;
        let id = UserId::from_str(header).map_err(|_| {
            ApiError::from(AppError::Unauthorized(format!(
                "{USER_HEADER} is not a valid id"
            )))
        })?;
        Ok(Self(id))
    }
}
