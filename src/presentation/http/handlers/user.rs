//! User Handlers

use axum::Json;
use serde::Serialize;

use crate::presentation::http::extractors::AuthUser;

/// Current user response
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user_id: String,
}

/// Get the authenticated caller's identity
pub async fn get_current_user(auth: AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user_id: auth.user_id,
    })
}
