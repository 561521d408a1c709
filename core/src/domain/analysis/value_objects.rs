use serde::{Deserialize, Serialize};

use crate::domain::profile::entities::UserProfile;

/// Every proxy route lives under this prefix.
pub const API_PREFIX: &str = "/api";
pub const ANALYZE_INGREDIENTS_PATH: &str = "/analyze-ingredients";
pub const ANALYZE_TEXT_PATH: &str = "/analyze-text";

#[derive(Debug, Clone)]
pub struct AnalyzeIngredientsInput {
    /// Base64 JPEG payload, exactly as received from the client.
    pub image_buffer: String,
    pub profile: UserProfile,
}

#[derive(Debug, Clone)]
pub struct AnalyzeTextInput {
    pub text: String,
    pub profile: UserProfile,
}

/// Body of `POST /api/analyze-ingredients`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeIngredientsPayload<'a> {
    pub image_buffer: &'a str,
    pub profile: &'a UserProfile,
}

/// Body of `POST /api/analyze-text`.
#[derive(Debug, Serialize)]
pub struct AnalyzeTextPayload<'a> {
    pub text: &'a str,
    pub profile: &'a UserProfile,
}

/// Error body returned by the proxy for every non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}
