use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header::ALLOW},
    response::{IntoResponse, Response},
};
use labeliq_core::domain::{
    common::entities::app_errors::CoreError, rate_limit::entities::RateLimitDecision,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::application::rate_limit_middleware::{insert_rate_limit_headers, insert_retry_after};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const NOT_FOUND_MESSAGE: &str = "Not found";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{error}")]
    Validation { error: String, details: Vec<String> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{}", RATE_LIMIT_MESSAGE)]
    TooManyRequests {
        retry_after_secs: u64,
        decision: Option<RateLimitDecision>,
    },

    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed { allow: &'static str },

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
}

impl<'a> ErrorResponse<'a> {
    fn message(error: &'a str) -> Self {
        Self {
            error,
            details: None,
            code: None,
        }
    }

    fn with_details(error: &'a str, details: &'a [String]) -> Self {
        Self {
            error,
            details: Some(details),
            code: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { error, details } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_details(&error, &details)),
            )
                .into_response(),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_details(INVALID_BODY_MESSAGE, &[message])),
            )
                .into_response(),
            ApiError::PayloadTooLarge(message) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse::with_details(INVALID_BODY_MESSAGE, &[message])),
            )
                .into_response(),
            ApiError::TooManyRequests {
                retry_after_secs,
                decision,
            } => {
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse {
                        error: RATE_LIMIT_MESSAGE,
                        details: None,
                        code: Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
                    }),
                )
                    .into_response();
                if let Some(decision) = decision {
                    insert_rate_limit_headers(response.headers_mut(), &decision);
                }
                insert_retry_after(response.headers_mut(), retry_after_secs);
                response
            }
            ApiError::MethodNotAllowed { allow } => {
                let mut response = (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Json(ErrorResponse::message(METHOD_NOT_ALLOWED_MESSAGE)),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static(allow));
                response
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::message(NOT_FOUND_MESSAGE)),
            )
                .into_response(),
            ApiError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message(INTERNAL_ERROR_MESSAGE)),
            )
                .into_response(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation { error, details } => ApiError::Validation { error, details },
            CoreError::RateLimited { retry_after_secs } => ApiError::TooManyRequests {
                retry_after_secs,
                decision: None,
            },
            other => {
                tracing::error!("request failed: {}", other);
                ApiError::InternalServerError(other.to_string())
            }
        }
    }
}

/// Top-level message returned when a request body fails validation.
pub trait ValidationSummary {
    const SUMMARY: &'static str;
}

/// JSON extractor that runs `validator` rules before the handler sees the body.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + ValidationSummary,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ApiError::from)?;

        value.validate().map_err(|errors| ApiError::Validation {
            error: T::SUMMARY.to_string(),
            details: validation_details(&errors),
        })?;

        Ok(ValidateJson(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }
}

/// Distinct field messages, sorted so responses are stable.
fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .into_values()
        .flat_map(|errors| errors.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    details.sort();
    details.dedup();
    details
}
