use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use super::json_response;

/// Rejections raised while turning form values into engine parameters.
/// Amounts and rates are passed through as entered; only the vesting
/// period is checked, since the yearly tranche divides by it.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{0} must be a whole number >= 1")]
    VestingYears(&'static str),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Invalid API payload: {0}")]
    Payload(String),
    #[error("Failed to encode projection: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) | ApiError::Payload(_) => StatusCode::BAD_REQUEST,
            ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_response(
            self.status(),
            ErrorResponse {
                error: self.to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vesting_error_names_the_field_as_sent() {
        assert_eq!(
            InputError::VestingYears("vestingYears").to_string(),
            "vestingYears must be a whole number >= 1"
        );
        assert_eq!(
            InputError::VestingYears("--vesting-years").to_string(),
            "--vesting-years must be a whole number >= 1"
        );
    }

    #[test]
    fn api_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::from(InputError::VestingYears("vestingYears")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Payload("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_response_carries_status_and_no_store() {
        let response = ApiError::from(InputError::VestingYears("vestingYears")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }
}
