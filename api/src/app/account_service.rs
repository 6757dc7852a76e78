//! Account service
//!
//! Handles password-grant token issuance, bearer token authentication and
//! administrative user management.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{AccessToken, AccountRequest, NewUser, Role, User, UserInfo};
use crate::domain::ports::AccountRepository;
use crate::error::{AppError, DomainError};

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_GRANT: &str = "The user name or password is incorrect.";

/// A freshly issued bearer token; the plain token is only available here
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub user_name: String,
    pub expires_in: i64,
}

/// Service for user accounts and tokens
pub struct AccountService<AR>
where
    AR: AccountRepository + ?Sized,
{
    accounts: Arc<AR>,
    token_ttl: Duration,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository + ?Sized,
{
    pub fn new(accounts: Arc<AR>, token_ttl_hours: i64) -> Self {
        Self {
            accounts,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Create the administrator account if it does not exist yet
    ///
    /// Returns true when a user was created.
    pub async fn seed_admin(&self, user_name: &str, password: &str) -> Result<bool, AppError> {
        if self.accounts.find_user_by_name(user_name).await?.is_some() {
            return Ok(false);
        }

        let salt = generate_salt();
        let new_user = NewUser {
            user_name: user_name.to_string(),
            password_hash: hash_password(password, &salt)?,
            password_salt: salt,
            role: Role::Admin,
            authorized_projects: None,
        };
        self.accounts.create_user(&new_user).await?;

        tracing::info!(user = %user_name, "Seeded administrator account");
        Ok(true)
    }

    /// OAuth2 resource-owner password grant
    pub async fn issue_token(
        &self,
        grant_type: Option<&str>,
        user_name: Option<&str>,
        password: Option<&str>,
    ) -> Result<IssuedToken, AppError> {
        match grant_type {
            Some("password") => {}
            Some(_) => {
                return Err(AppError::OAuth {
                    error: "unsupported_grant_type",
                    description: "Only the password grant is supported.".to_string(),
                })
            }
            None => {
                return Err(AppError::OAuth {
                    error: "invalid_request",
                    description: "grant_type is required.".to_string(),
                })
            }
        }

        let invalid_grant = || AppError::OAuth {
            error: "invalid_grant",
            description: INVALID_GRANT.to_string(),
        };

        let (Some(user_name), Some(password)) = (user_name, password) else {
            return Err(invalid_grant());
        };

        let user = self
            .accounts
            .find_user_by_name(user_name)
            .await?
            .ok_or_else(invalid_grant)?;

        if !verify_password(password, &user.password_salt, &user.password_hash) {
            tracing::warn!(user = %user_name, "Rejected token request with wrong password");
            return Err(invalid_grant());
        }

        let now = Utc::now();
        self.purge_expired_tokens(now).await?;

        let access_token = generate_token();
        let token = AccessToken {
            token_hash: hash_token(&access_token),
            user_id: user.id,
            expires_at: now + self.token_ttl,
        };
        self.accounts.create_token(&token).await?;

        tracing::info!(user = %user.user_name, "Issued access token");
        Ok(IssuedToken {
            access_token,
            user_name: user.user_name,
            expires_in: self.token_ttl.num_seconds(),
        })
    }

    /// Resolve a bearer token to its user; unknown or expired tokens yield None
    pub async fn authenticate(&self, access_token: &str) -> Result<Option<User>, AppError> {
        let Some(token) = self.accounts.find_token(&hash_token(access_token)).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if token.is_expired(now) {
            self.purge_expired_tokens(now).await?;
            return Ok(None);
        }

        Ok(self.accounts.find_user_by_id(&token.user_id).await?)
    }

    async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let removed = self.accounts.delete_expired_tokens(now).await?;
        if removed > 0 {
            tracing::debug!(removed, "Purged expired access tokens");
        }
        Ok(())
    }

    /// Names of all users
    pub async fn list_user_names(&self) -> Result<Vec<String>, AppError> {
        let users = self.accounts.list_users().await?;
        Ok(users.into_iter().map(|u| u.user_name).collect())
    }

    /// All users without credentials
    pub async fn list_users(&self) -> Result<Vec<UserInfo>, AppError> {
        let users = self.accounts.list_users().await?;
        Ok(users.into_iter().map(UserInfo::from).collect())
    }

    /// Create a user from `UserName`, `Password`, `ConfirmPassword`, `Role`
    /// and `AuthorizedProjects`
    pub async fn add_user(&self, request: &AccountRequest) -> Result<String, AppError> {
        let (Some(user_name), Some(password)) =
            (non_empty(&request.user_name), request.password.as_deref())
        else {
            return Err(bad_request("Argument Null"));
        };

        if request.password != request.confirm_password {
            return Err(bad_request("Password not consistent"));
        }

        if self.accounts.find_user_by_name(user_name).await?.is_some() {
            return Err(bad_request("User already exists"));
        }

        check_password_rules(password)?;

        let role = match non_empty(&request.role) {
            Some(role) => role.parse::<Role>().map_err(AppError::BadRequest)?,
            None => Role::User,
        };

        let salt = generate_salt();
        let new_user = NewUser {
            user_name: user_name.to_string(),
            password_hash: hash_password(password, &salt)?,
            password_salt: salt,
            role,
            authorized_projects: request.authorized_projects.clone(),
        };
        let user = self.accounts.create_user(&new_user).await?;

        tracing::info!(user = %user.user_name, role = %user.role, "User created");
        Ok(format!("User {} created successfully.", user.user_name))
    }

    /// Remove the user named in `UserName`; callers cannot remove themselves
    pub async fn remove_user(
        &self,
        request: &AccountRequest,
        caller: &User,
    ) -> Result<String, AppError> {
        let user_name = non_empty(&request.user_name).ok_or_else(|| bad_request("Argument Null"))?;

        let user = self
            .accounts
            .find_user_by_name(user_name)
            .await?
            .ok_or_else(|| bad_request("User does not exists"))?;

        if user.user_name.eq_ignore_ascii_case(&caller.user_name) {
            return Err(bad_request("Cannot remove self"));
        }

        self.accounts.delete_user(&user.id).await?;

        tracing::info!(user = %user.user_name, by = %caller.user_name, "User removed");
        Ok(format!("User {} removed successfully.", user.user_name))
    }

    /// Change the caller's password given `OldPassword`, `Password` and
    /// `ConfirmPassword`
    pub async fn change_password(
        &self,
        request: &AccountRequest,
        caller: &User,
    ) -> Result<String, AppError> {
        let old_password = non_empty(&request.old_password)
            .ok_or_else(|| bad_request("Old password could not be empty"))?;

        if request.password != request.confirm_password {
            return Err(bad_request("Password not consistent"));
        }
        let password = request
            .password
            .as_deref()
            .ok_or_else(|| bad_request("Argument Null"))?;

        // Re-read so a password changed by another session is honoured
        let user = self
            .accounts
            .find_user_by_id(&caller.id)
            .await?
            .ok_or_else(|| {
                AppError::Domain(DomainError::NotFound(format!(
                    "User {} not found",
                    caller.user_name
                )))
            })?;

        if !verify_password(old_password, &user.password_salt, &user.password_hash) {
            return Err(bad_request("Incorrect password."));
        }

        check_password_rules(password)?;

        let salt = generate_salt();
        self.accounts
            .update_password(&user.id, &hash_password(password, &salt)?, &salt)
            .await?;

        tracing::info!(user = %user.user_name, "Password changed");
        Ok("Password changed".to_string())
    }
}

fn bad_request(msg: &str) -> AppError {
    AppError::BadRequest(msg.to_string())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn check_password_rules(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Passwords must be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn random_hex(len: usize) -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}

/// Generate a random per-user salt
fn generate_salt() -> String {
    random_hex(16)
}

/// Generate a random bearer token
fn generate_token() -> String {
    random_hex(32)
}

/// Hash a bearer token for storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// HMAC-SHA256 of the password keyed with the salt
pub fn hash_password(password: &str, salt: &str) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .map_err(|e| AppError::Internal(format!("Invalid password salt: {}", e)))?;
    mac.update(password.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a password against its stored hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let Ok(expected) = hex::decode(expected_hash) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(salt.as_bytes()) else {
        return false;
    };
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
