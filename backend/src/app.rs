use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    docs::ApiDoc,
    handlers,
    middleware as app_middleware,
    services::{
        revocation::{InMemoryRevocationStore, RedisRevocationStore, RevocationStore},
        session::JwtSessionOracle,
    },
    state::AppState,
};

/// Wires the JWT session oracle to Redis when configured, otherwise to the
/// in-process revocation store.
pub async fn build_state(config: Config) -> anyhow::Result<AppState> {
    let revocations: Arc<dyn RevocationStore> = if config.redis_url.is_some() {
        Arc::new(RedisRevocationStore::connect(&config).await?)
    } else {
        tracing::info!("REDIS_URL not set, using in-memory revocation store");
        Arc::new(InMemoryRevocationStore::new())
    };
    let oracle = JwtSessionOracle::new(config.jwt_secret.clone(), revocations);
    Ok(AppState::new(config, Arc::new(oracle)))
}

pub fn build_router(state: AppState) -> Router {
    // Logout stays unguarded: the terminator reports failure on its own.
    let public_routes = Router::new()
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/session", get(handlers::auth::current_session))
        .route("/api/admin/access", get(handlers::admin::admin_access));

    let admin_routes = Router::new()
        .route("/api/admin/session", get(handlers::admin::admin_session))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::require_admin,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(app_middleware::request_id))
                .layer(axum_middleware::from_fn(app_middleware::log_error_responses))
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60))
}
