//! Route configuration and setup

use crate::auth::{auth_middleware, AuthState};
use crate::constants::{HEALTH_ROUTE, UPLOAD_THUMBNAIL_ROUTE};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tubely_core::Config;
use tubely_storage::urls::{ASSETS_PATH, THUMBNAILS_PATH};

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState::new(config.jwt_secret()));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route(HEALTH_ROUTE, get(handlers::health::health_check))
        .route(
            &format!("{}/{{file}}", ASSETS_PATH),
            get(handlers::assets::get_asset),
        )
        .route(
            &format!("{}/{{video_id}}", THUMBNAILS_PATH),
            get(handlers::assets::get_thumbnail),
        );

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .route(
            UPLOAD_THUMBNAIL_ROUTE,
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let app = public_routes
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
