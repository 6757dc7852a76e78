use std::env;

/// Database name used when neither the request nor the parent area names one
pub const DEFAULT_DATABASE: &str = "iS3Db";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Fallback `DbName` for new areas
    pub default_database: String,
    /// Administrator account seeded at start-up
    pub admin_username: String,
    pub admin_password: String,
    /// Lifetime of issued bearer tokens
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            default_database: env::var("DEFAULT_DATABASE")
                .unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "Admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "iS3Admin".to_string()),
            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(24),
        }
    }
}
