//! Account domain entities
//!
//! Users authenticate with a password to obtain an opaque bearer token.
//! Only hashes of passwords and tokens are ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authorization role carried by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: Role,
    /// Projects the user may visit
    pub authorized_projects: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: Role,
    pub authorized_projects: Option<String>,
}

/// Public view of a user, without credentials
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "Role")]
    pub role: Role,
    #[serde(rename = "AuthorizedProjects")]
    pub authorized_projects: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            id: user.id.to_string(),
            user_name: user.user_name,
            role: user.role,
            authorized_projects: user.authorized_projects,
        }
    }
}

/// Account management request body
///
/// One shape serves `AddUser`, `RemoveUser` and `ChangePassword`; each
/// operation reads the fields it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountRequest {
    #[serde(rename = "UserName", alias = "Username", alias = "username", default)]
    pub user_name: Option<String>,
    #[serde(rename = "Password", alias = "password", default)]
    pub password: Option<String>,
    #[serde(rename = "ConfirmPassword", alias = "confirmPassword", default)]
    pub confirm_password: Option<String>,
    #[serde(rename = "OldPassword", alias = "oldPassword", default)]
    pub old_password: Option<String>,
    #[serde(rename = "Role", alias = "role", default)]
    pub role: Option<String>,
    #[serde(rename = "AuthorizedProjects", alias = "authorizedProjects", default)]
    pub authorized_projects: Option<String>,
}

/// An issued bearer token, identified by its hash
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token_hash: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(Role::User.to_string(), "User");
    }

    #[test]
    fn token_expiry() {
        let now = Utc::now();
        let token = AccessToken {
            token_hash: "h".to_string(),
            user_id: UserId::new(),
            expires_at: now + Duration::hours(1),
        };
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::hours(2)));
    }

    #[test]
    fn account_request_accepts_name_spellings() {
        let req: AccountRequest =
            serde_json::from_str(r#"{"Username":"lxj","Password":"p","Role":"User"}"#).unwrap();
        assert_eq!(req.user_name.as_deref(), Some("lxj"));
        assert_eq!(req.role.as_deref(), Some("User"));

        let req: AccountRequest = serde_json::from_str(r#"{"UserName":"lxj"}"#).unwrap();
        assert_eq!(req.user_name.as_deref(), Some("lxj"));
        assert!(req.password.is_none());
    }

    #[test]
    fn user_info_hides_credentials() {
        let user = User {
            id: UserId(Uuid::nil()),
            user_name: "lxj".to_string(),
            password_hash: "secret-hash".to_string(),
            password_salt: "salt".to_string(),
            role: Role::User,
            authorized_projects: Some("P1,P2".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserInfo::from(user)).unwrap();
        assert!(json.contains("\"UserName\":\"lxj\""));
        assert!(json.contains("\"Role\":\"User\""));
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("salt"));
    }
}
