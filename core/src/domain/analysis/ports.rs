use std::future::Future;

use crate::domain::{
    analysis::{
        entities::ScanResult,
        value_objects::{AnalyzeIngredientsInput, AnalyzeTextInput},
    },
    capture::entities::Capture,
    common::entities::app_errors::CoreError,
    profile::entities::UserProfile,
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_base64: String,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Server-side analysis: prompt building, provider call and strict parsing.
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisService: Send + Sync {
    fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;

    fn analyze_text(
        &self,
        input: AnalyzeTextInput,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;
}

/// Client-side contract used by the orchestrator.
///
/// Implementations classify failures into `Network`, `RateLimited`,
/// `Validation` and `ExternalServiceError` and never retry.
pub trait AnalysisClient: Send + Sync {
    fn analyze(
        &self,
        capture: &Capture,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;
}
