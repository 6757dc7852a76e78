//! iS3 MiniServer API
//!
//! Administrative backend for a geotechnical information system: a
//! territory/domain/project registry, monitoring records and token-based
//! user accounts.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::{de::DeserializeOwned, Serialize};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ensure_schema, PostgresAccountRepository, PostgresAreaRepository,
    PostgresMonitoringRepository,
};
use app::{AccountService, AreaService, MonitoringService};
use config::Config;
use domain::entities::{MonData, MonGroup, MonPoint, MonProject, MonitoringRecord};
use domain::ports::{AccountRepository, AreaRepository, MonitoringRepository, MonitoringStore};
use handlers::monitoring;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub area_service: Arc<AreaService<dyn AreaRepository>>,
    pub monitoring_service: Arc<MonitoringService<dyn MonitoringStore>>,
    pub account_service: Arc<AccountService<dyn AccountRepository>>,
    pub config: Config,
}

impl AppState {
    /// Wire services over the given repositories
    pub fn new(
        areas: Arc<dyn AreaRepository>,
        records: Arc<dyn MonitoringStore>,
        accounts: Arc<dyn AccountRepository>,
        config: Config,
    ) -> Self {
        Self {
            area_service: Arc::new(AreaService::new(areas, config.default_database.clone())),
            monitoring_service: Arc::new(MonitoringService::new(records)),
            account_service: Arc::new(AccountService::new(accounts, config.token_ttl_hours)),
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `/Token` without rate limiting
pub fn token_routes() -> Router<AppState> {
    Router::new().route("/Token", post(handlers::issue_token))
}

/// Register the five CRUD routes of one monitoring record type
fn monitoring_routes<T>(router: Router<AppState>) -> Router<AppState>
where
    T: MonitoringRecord + DeserializeOwned,
    dyn MonitoringStore: MonitoringRepository<T>,
{
    let label = T::LABEL;
    router
        .route(&format!("/GetAll{}s", label), get(monitoring::get_all::<T>))
        .route(&format!("/Get{}ByID", label), get(monitoring::get_by_id::<T>))
        .route(&format!("/Add{}", label), post(monitoring::add::<T>))
        .route(&format!("/Modify{}", label), put(monitoring::modify::<T>))
        .route(&format!("/Remove{}", label), delete(monitoring::remove::<T>))
}

/// Build the application router
///
/// `token_routes` is merged unauthenticated so the caller decides whether
/// it is rate limited.
pub fn build_router(state: AppState, token_routes: Router<AppState>) -> Router {
    let territories = Router::new()
        .route(
            "/SupportedTerritories",
            get(handlers::supported_territories),
        )
        .route("/SupportedDomains", get(handlers::supported_domains))
        .route("/SupportedProjects", get(handlers::supported_projects))
        .route(
            "/GetAllTerritoryDescs",
            get(handlers::get_all_territory_descs),
        )
        .route("/GetTerritoryDesc", get(handlers::get_territory_desc))
        .route("/AddTerritory", post(handlers::add_territory))
        .route("/AddDomain", post(handlers::add_domain))
        .route("/AddProject", post(handlers::add_project))
        .route("/GetDomainDesc", get(handlers::get_domain_desc))
        .route("/GetProjectDesc", get(handlers::get_project_desc))
        .route("/GetDomainDescs", get(handlers::get_domain_descs))
        .route("/GetProjectDescs", get(handlers::get_project_descs));

    let monitoring = Router::new();
    let monitoring = monitoring_routes::<MonProject>(monitoring);
    let monitoring = monitoring_routes::<MonGroup>(monitoring);
    let monitoring = monitoring_routes::<MonPoint>(monitoring);
    let monitoring = monitoring_routes::<MonData>(monitoring)
        .route("/GetMonProjectTree", get(monitoring::get_project_tree));

    let admin_accounts = Router::new()
        .route("/GetUsers", get(handlers::get_users))
        .route("/GetUsersFullInfo", get(handlers::get_users_full_info))
        .route("/AddUser", post(handlers::add_user))
        .route("/RemoveUser", post(handlers::remove_user));

    // Layers run bottom-up: authenticate first, then check the role
    let admin_routes = Router::new()
        .nest("/api/Territories", territories)
        .nest("/api/Monitoring", monitoring)
        .nest("/api/Accounts", admin_accounts)
        .layer(middleware::from_fn(auth::require_admin));

    let protected_routes = Router::new()
        .route(
            "/api/Accounts/ChangePassword",
            post(handlers::change_password),
        )
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(token_routes)
        .merge(protected_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,miniserver_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting iS3 MiniServer API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    ensure_schema(&db).await?;
    tracing::info!("Database connected");

    // Create adapters
    let area_repo: Arc<dyn AreaRepository> = Arc::new(PostgresAreaRepository::new(db.clone()));
    let monitoring_repo: Arc<dyn MonitoringStore> =
        Arc::new(PostgresMonitoringRepository::new(db.clone()));
    let account_repo: Arc<dyn AccountRepository> =
        Arc::new(PostgresAccountRepository::new(db.clone()));

    let state = AppState::new(area_repo, monitoring_repo, account_repo, config.clone());

    state
        .account_service
        .seed_admin(&config.admin_username, &config.admin_password)
        .await?;

    // Rate limiting for token requests: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Failed to build governor config"))?,
    );
    let rate_limited_token = token_routes().layer(GovernorLayer {
        config: governor_config,
    });

    let app = build_router(state, rate_limited_token);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
