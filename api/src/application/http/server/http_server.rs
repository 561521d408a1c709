use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
};
use labeliq_core::{
    application::create_service,
    domain::{
        analysis::value_objects::API_PREFIX, capture::entities::MAX_REQUEST_BODY_BYTES,
        common::LabelIqConfig,
        rate_limit::FixedWindowRateLimiter,
    },
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, info_span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    application::{
        http::{
            analysis::router::analysis_routes, health::health_routes,
            server::{api_entities::api_error::ApiError, app_state::AppState, openapi::ApiDoc},
        },
        rate_limit_middleware::rate_limit,
    },
    args::Args,
};

/// JSON bodies carry base64 images, so the cap is generous.
pub const MAX_BODY_BYTES: usize = MAX_REQUEST_BODY_BYTES;

async fn api_not_found() -> ApiError {
    ApiError::NotFound
}

pub fn state(args: Arc<Args>) -> AppState {
    let config = LabelIqConfig::from(args.as_ref().clone());
    debug!(
        window_secs = config.rate_limit.window.as_secs(),
        max_requests = config.rate_limit.max_requests,
        "rate limiter configured"
    );

    let rate_limiter = FixedWindowRateLimiter::new(config.rate_limit.clone());
    let service = create_service(config);

    AppState::new(args, service, rate_limiter)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    if origins.iter().any(|origin| origin == "*") {
        return Ok(cors.allow_origin(AllowOrigin::any()));
    }

    let allowed_origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid allowed origin {:?}", origin))
        })
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    debug!("Allowed origins: {:?}", allowed_origins);

    Ok(cors
        .allow_origin(allowed_origins)
        .allow_credentials(true))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let cors = cors_layer(&state.args.server.allowed_origins)?;

    let api_routes = Router::new()
        .merge(analysis_routes())
        .merge(health_routes())
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_PREFIX, api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    Ok(router)
}
