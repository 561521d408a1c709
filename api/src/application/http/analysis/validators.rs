use labeliq_core::domain::profile::entities::UserProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ValidationSummary;

/// Fields are optional so a missing one surfaces as a validation error rather
/// than a body parse failure.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeIngredientsRequest {
    /// Base64 encoded JPEG, without a data URL prefix.
    #[validate(
        required(message = "Missing imageBuffer or profile in request body"),
        length(min = 1, message = "Missing imageBuffer or profile in request body")
    )]
    pub image_buffer: Option<String>,

    #[validate(required(message = "Missing imageBuffer or profile in request body"))]
    pub profile: Option<UserProfile>,
}

impl ValidationSummary for AnalyzeIngredientsRequest {
    const SUMMARY: &'static str = "imageBuffer and profile are required";
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeTextRequest {
    #[validate(
        required(message = "Missing text or profile in request body"),
        length(min = 1, message = "Missing text or profile in request body")
    )]
    pub text: Option<String>,

    #[validate(required(message = "Missing text or profile in request body"))]
    pub profile: Option<UserProfile>,
}

impl ValidationSummary for AnalyzeTextRequest {
    const SUMMARY: &'static str = "text and profile are required";
}

impl AnalyzeIngredientsRequest {
    /// Splits a validated request into its parts.
    pub fn into_parts(self) -> Option<(String, UserProfile)> {
        Some((self.image_buffer?, self.profile?))
    }
}

impl AnalyzeTextRequest {
    pub fn into_parts(self) -> Option<(String, UserProfile)> {
        Some((self.text?, self.profile?))
    }
}
