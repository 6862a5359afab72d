use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Storage;
use crate::services::{AuthService, WorkforceService};
use crate::state::SharedState;

pub mod auth;
mod error;
mod holidays;
mod observability;
mod stores;
mod system;
mod timelogs;
mod types;
mod users;
mod validation;
mod workers;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.shared.storage
    }

    #[must_use]
    pub fn workforce(&self) -> &dyn WorkforceService {
        self.shared.workforce.as_ref()
    }

    #[must_use]
    pub fn auth(&self) -> &dyn AuthService {
        self.shared.auth.as_ref()
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(create_protected_router(state.clone()))
        .route("/auth/admin", post(auth::login_admin))
        .route("/auth/store", post(auth::login_store))
        .route("/health", get(system::health))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
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
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Everything behind a bearer token. The role guard sits inside the token
/// check, so it always sees validated claims.
fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin_routes = Router::new()
        .route("/workers", get(workers::list_workers))
        .route("/workers/create", post(workers::create_worker))
        .route("/workers/{id}", get(workers::get_worker))
        .route("/workers/update/{id}", post(workers::update_worker))
        .route("/workers/delete/{id}", post(workers::delete_worker))
        .route("/stores", get(stores::list_stores))
        .route("/stores/create", post(stores::create_store))
        .route("/stores/{id}", get(stores::get_store))
        .route("/stores/update/{id}", post(stores::update_store))
        .route("/stores/delete/{id}", post(stores::delete_store))
        .route("/holidays", get(holidays::list_holidays))
        .route("/holidays/create", post(holidays::create_holiday))
        .route("/holidays/workers", get(holidays::list_holidays_with_workers))
        .route("/holidays/{id}", get(holidays::get_holiday))
        .route("/holidays/update/{id}", post(holidays::update_holiday))
        .route("/holidays/delete/{id}", post(holidays::delete_holiday))
        .route("/users", get(users::list_users))
        .route("/timelogs", get(timelogs::list_timelogs))
        .route_layer(middleware::from_fn_with_state(
            auth::ADMIN_ONLY,
            auth::require_role,
        ));

    let terminal_routes = Router::new()
        .route("/timelog/create", post(timelogs::create_timelog))
        .route_layer(middleware::from_fn_with_state(
            auth::ADMIN_OR_STORE,
            auth::require_role,
        ));

    let metrics_routes = Router::new()
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(
            auth::ADMIN_ONLY,
            auth::require_role,
        ));

    Router::new()
        .nest("/admin", admin_routes.merge(terminal_routes))
        .merge(metrics_routes)
        .route("/auth/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
