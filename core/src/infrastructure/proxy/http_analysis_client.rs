use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use tracing::instrument;

use crate::domain::{
    analysis::{
        entities::ScanResult,
        ports::AnalysisClient,
        value_objects::{
            ANALYZE_INGREDIENTS_PATH, ANALYZE_TEXT_PATH, API_PREFIX, AnalyzeIngredientsPayload,
            AnalyzeTextPayload, ErrorBody,
        },
    },
    capture::entities::Capture,
    common::entities::app_errors::CoreError,
    profile::entities::UserProfile,
};

const RATE_LIMIT_RESET: &str = "ratelimit-reset";

/// Talks to the analysis proxy; the model credential never leaves the server.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    base_url: String,
    client: Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn classify(response: Response) -> Result<ScanResult, CoreError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| {
                tracing::error!("failed to read analysis response: {}", e);
                CoreError::Network(e.to_string())
            })?;
            return parse_scan_result(&body);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = retry_after(&response).unwrap_or(0);
            tracing::warn!(retry_after_secs, "analysis proxy rate limited the request");
            return Err(CoreError::RateLimited { retry_after_secs });
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        if status == StatusCode::BAD_REQUEST {
            let error = if body.error.is_empty() {
                "Bad request".to_string()
            } else {
                body.error
            };
            return Err(CoreError::validation(error, body.details));
        }

        tracing::error!("analysis proxy returned {}: {}", status, body.error);
        Err(CoreError::ExternalServiceError(format!(
            "analysis proxy returned {}",
            status
        )))
    }
}

fn parse_scan_result(body: &str) -> Result<ScanResult, CoreError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!("analysis proxy returned a body that is not a scan result: {}", e);
        CoreError::ExternalServiceError(format!("Invalid proxy response: {}", e))
    })
}

fn retry_after(response: &Response) -> Option<u64> {
    [RETRY_AFTER.as_str(), RATE_LIMIT_RESET]
        .iter()
        .filter_map(|name| response.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| value.trim().parse().ok())
}

impl AnalysisClient for HttpAnalysisClient {
    #[instrument(skip_all, fields(kind = ?capture.kind()))]
    async fn analyze(
        &self,
        capture: &Capture,
        profile: &UserProfile,
    ) -> Result<ScanResult, CoreError> {
        let request = match capture {
            Capture::Image { data } => self
                .client
                .post(self.endpoint(ANALYZE_INGREDIENTS_PATH))
                .json(&AnalyzeIngredientsPayload {
                    image_buffer: data,
                    profile,
                }),
            Capture::Text { content } => self
                .client
                .post(self.endpoint(ANALYZE_TEXT_PATH))
                .json(&AnalyzeTextPayload {
                    text: content,
                    profile,
                }),
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("analysis request failed: {}", e);
            CoreError::Network(e.to_string())
        })?;

        Self::classify(response).await
    }
}
