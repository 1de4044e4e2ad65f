use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;

use super::validation::validate_email;
use super::{ApiError, AppState, GenerateTokenRequest, TokenResponse};

/// POST /api/generate_token
///
/// Issues the one token an email may hold. A second request for the same
/// email is rejected and the existing token stays valid.
pub async fn generate_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateTokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;
    let email = validate_email(&request.email)?;

    let issued = state.token_service().issue(email).await?;

    Ok(Json(TokenResponse {
        message: "Token generated successfully".to_string(),
        token: issued.token,
    }))
}
