pub mod dispatch;
pub mod error;
mod handlers;
pub mod middleware;
pub mod page;
pub mod params;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, on, MethodFilter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::weather::WeatherService;

pub use error::ApiError;
pub use handlers::{WeatherApiResponse, API_SOURCE};
pub use middleware::SecurityConfig;

/// Router for the weather aggregator: the HTML page and its JSON twin.
pub fn create_weather_router(service: WeatherService) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/weather", get(handlers::api_weather))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// CRUD router with security configuration from the environment.
pub fn create_crud_router(db: Database) -> Router {
    create_crud_router_with_config(db, SecurityConfig::from_env())
}

/// CRUD router with explicit security configuration.
pub fn create_crud_router_with_config(db: Database, config: SecurityConfig) -> Router {
    let verbs = MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE);

    Router::new()
        .route("/api", on(verbs, handlers::api_router))
        .route_layer(from_fn_with_state(config, middleware::auth_middleware))
        // Registered after the auth layer so it stays public
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
