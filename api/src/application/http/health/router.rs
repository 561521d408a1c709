use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{__path_health, health};
use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const HEALTH_PATH: &str = "/health";

#[derive(OpenApi)]
#[openapi(paths(health))]
pub struct HealthApiDoc;

async fn get_only() -> ApiError {
    ApiError::MethodNotAllowed { allow: "GET" }
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health).fallback(get_only))
}
