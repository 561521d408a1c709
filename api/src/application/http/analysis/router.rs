use axum::{Router, routing::post};
use labeliq_core::domain::analysis::value_objects::{ANALYZE_INGREDIENTS_PATH, ANALYZE_TEXT_PATH};
use utoipa::OpenApi;

use super::handlers::{
    analyze_ingredients::{__path_analyze_ingredients, analyze_ingredients},
    analyze_text::{__path_analyze_text, analyze_text},
};
use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(analyze_ingredients, analyze_text))]
pub struct AnalysisApiDoc;

async fn post_only() -> ApiError {
    ApiError::MethodNotAllowed { allow: "POST" }
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route(
            ANALYZE_INGREDIENTS_PATH,
            post(analyze_ingredients).fallback(post_only),
        )
        .route(ANALYZE_TEXT_PATH, post(analyze_text).fallback(post_only))
}
