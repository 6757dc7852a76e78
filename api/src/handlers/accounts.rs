//! Account handlers
//!
//! Endpoints under `api/Accounts`. Responses for mutations are a JSON
//! string carrying the outcome message.

use axum::{extract::State, Extension, Json};

use super::extract::FormOrJson;
use crate::domain::entities::{AccountRequest, User, UserInfo};
use crate::error::AppError;
use crate::AppState;

/// GET api/Accounts/GetUsers
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.account_service.list_user_names().await?))
}

/// GET api/Accounts/GetUsersFullInfo
pub async fn get_users_full_info(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    Ok(Json(state.account_service.list_users().await?))
}

/// POST api/Accounts/AddUser
pub async fn add_user(
    State(state): State<AppState>,
    FormOrJson(request): FormOrJson<AccountRequest>,
) -> Result<Json<String>, AppError> {
    Ok(Json(state.account_service.add_user(&request).await?))
}

/// POST api/Accounts/RemoveUser
pub async fn remove_user(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    FormOrJson(request): FormOrJson<AccountRequest>,
) -> Result<Json<String>, AppError> {
    Ok(Json(
        state.account_service.remove_user(&request, &caller).await?,
    ))
}

/// POST api/Accounts/ChangePassword
pub async fn change_password(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    FormOrJson(request): FormOrJson<AccountRequest>,
) -> Result<Json<String>, AppError> {
    Ok(Json(
        state
            .account_service
            .change_password(&request, &caller)
            .await?,
    ))
}
