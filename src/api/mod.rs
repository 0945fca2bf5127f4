use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService, TokenService};

pub mod auth;
mod error;
mod projects;
mod reports;
mod resources;
mod secretariats;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let tokens = TokenService::new(&config.auth);
    let auth: Arc<dyn AuthService> = Arc::new(SeaOrmAuthService::new(store.clone(), tokens));

    Ok(Arc::new(AppState {
        config: Arc::new(RwLock::new(config)),
        store,
        auth,
    }))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config.read().await;
        config.server.cors_allowed_origins.clone()
    };

    let protected_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/users", get(auth::list_users))
        .route("/secretariats", get(secretariats::list_secretariats))
        .route("/secretariats", post(secretariats::create_secretariat))
        .route("/secretariats/{id}", get(secretariats::get_secretariat))
        .route("/secretariats/{id}", put(secretariats::update_secretariat))
        .route(
            "/secretariats/{id}",
            delete(secretariats::deactivate_secretariat),
        )
        .route("/projects", get(projects::list_projects))
        .route("/projects", post(projects::create_project))
        .route("/projects/dashboard", get(projects::project_dashboard))
        .route("/projects/{id}", get(projects::get_project))
        .route("/projects/{id}", put(projects::update_project))
        .route("/projects/{id}", delete(projects::delete_project))
        .route("/resources/bills", get(resources::list_bills))
        .route("/resources/bills", post(resources::create_bill))
        .route("/resources/bills/{id}", get(resources::get_bill))
        .route("/resources/bills/{id}", put(resources::update_bill))
        .route("/resources/materials", get(resources::list_materials))
        .route("/resources/materials", post(resources::create_material))
        .route("/resources/materials/{id}", get(resources::get_material))
        .route("/resources/materials/{id}", put(resources::update_material))
        .route("/resources/strategic", get(resources::list_resources))
        .route("/resources/strategic", post(resources::create_resource))
        .route("/resources/strategic/{id}", get(resources::get_resource))
        .route("/resources/strategic/{id}", put(resources::update_resource))
        .route("/resources/dashboard", get(resources::resource_dashboard))
        .route("/reports/secretariats", get(reports::secretariat_report))
        .route("/reports/government", get(reports::government_report))
        .route("/reports/dashboard", get(reports::general_dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// GET /health
/// Liveness probe; checks that the store answers.
async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthStatus>>, ApiError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })))
}
