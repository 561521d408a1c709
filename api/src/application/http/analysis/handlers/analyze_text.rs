use axum::extract::State;
use labeliq_core::domain::analysis::{
    entities::ScanResult, ports::AnalysisService, value_objects::AnalyzeTextInput,
};

use crate::application::http::{
    analysis::validators::AnalyzeTextRequest,
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
    path = "/analyze-text",
    tag = "analysis",
    summary = "Analyze a typed ingredient list",
    request_body = AnalyzeTextRequest,
    responses(
        (status = 200, body = ScanResult),
        (status = 400, description = "text or profile missing"),
        (status = 429, description = "Too many requests from this client"),
        (status = 500, description = "Provider failure or malformed provider output")
    )
)]
pub async fn analyze_text(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeTextRequest>,
) -> Result<Response<ScanResult>, ApiError> {
    let (text, profile) = payload.into_parts().ok_or_else(|| {
        ApiError::InternalServerError("validated request is missing a field".to_string())
    })?;

    let result = state
        .service
        .analyze_text(AnalyzeTextInput { text, profile })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
