use axum::extract::State;
use labeliq_core::domain::analysis::{
    entities::ScanResult, ports::AnalysisService, value_objects::AnalyzeIngredientsInput,
};

use crate::application::http::{
    analysis::validators::AnalyzeIngredientsRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze-ingredients",
    tag = "analysis",
    summary = "Analyze a label photo",
    description = "Extracts the ingredient list from a JPEG label photo and rates each ingredient against the submitted profile.",
    request_body = AnalyzeIngredientsRequest,
    responses(
        (status = 200, body = ScanResult),
        (status = 400, description = "imageBuffer or profile missing"),
        (status = 429, description = "Too many requests from this client"),
        (status = 500, description = "Provider failure or malformed provider output")
    )
)]
pub async fn analyze_ingredients(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeIngredientsRequest>,
) -> Result<Response<ScanResult>, ApiError> {
    let (image_buffer, profile) = payload.into_parts().ok_or_else(|| {
        ApiError::InternalServerError("validated request is missing a field".to_string())
    })?;

    let result = state
        .service
        .analyze_ingredients(AnalyzeIngredientsInput {
            image_buffer,
            profile,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
