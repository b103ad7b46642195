//! User registration endpoint

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{SignUpCandidate, User};

/// Request to register a new user
///
/// The id is assigned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpApiRequest {
    pub name: String,
    pub username: String,
    pub email_address: String,
}

/// Successful registration response
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

/// POST /users
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpApiRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    let id = Uuid::new_v4().to_string();
    debug!(user_id = %id, username = %request.username, "Registering user");

    let candidate = SignUpCandidate::new(id, request.name, request.username, request.email_address);

    let user = state
        .sign_up_service
        .sign_up(candidate)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            success: true,
            message: "User registered".to_string(),
            user,
        }),
    ))
}
