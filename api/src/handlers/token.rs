//! Token endpoint
//!
//! OAuth2 resource-owner password grant.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::extract::FormOrJson;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: Option<String>,
    #[serde(alias = "Username", alias = "UserName")]
    pub username: Option<String>,
    #[serde(alias = "Password")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    #[serde(rename = "userName")]
    pub user_name: String,
}

/// POST /Token
pub async fn issue_token(
    State(state): State<AppState>,
    FormOrJson(request): FormOrJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let issued = state
        .account_service
        .issue_token(
            request.grant_type.as_deref(),
            request.username.as_deref(),
            request.password.as_deref(),
        )
        .await?;

    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        token_type: "bearer",
        expires_in: issued.expires_in,
        user_name: issued.user_name,
    }))
}
