//! API error handling
//!
//! [`ApiError`] is the single error type handlers return. Domain errors map
//! onto it by family: not-found becomes 404, domain validation rejections
//! become 400, request-shape failures 422, conflicts 409, and storage
//! failures 500 with the detail kept out of the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_ledger::LedgerError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                Some(details),
            ),
            ApiError::Internal(detail) => {
                // the underlying failure goes to the log, not the client
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else if err.is_invalid_input() {
            ApiError::BadRequest(err.to_string())
        } else {
            match err {
                LedgerError::Conflict(msg) => ApiError::Conflict(msg),
                other => ApiError::Internal(other.to_string()),
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, violations)| {
                violations.iter().map(move |violation| {
                    match &violation.message {
                        Some(message) => format!("{field}: {message}"),
                        None => format!("{field}: {}", violation.code),
                    }
                })
            })
            .collect();
        details.sort();

        ApiError::Validation {
            message: "request validation failed".to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{MeterId, Money};

    #[test]
    fn test_not_found_family_maps_to_404() {
        let api: ApiError = LedgerError::MeterNotFound(MeterId::new()).into();
        assert_eq!(api.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_input_family_maps_to_400() {
        let api: ApiError = LedgerError::ReadingNotMonotonic {
            submitted: 120,
            baseline: 150,
        }
        .into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let api: ApiError = LedgerError::NonPositivePayment(Money::zero()).into();
        assert_eq!(api.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let api: ApiError = LedgerError::Conflict("meter row contended".into()).into();
        assert_eq!(api.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_storage_maps_to_500_with_generic_message() {
        let api: ApiError = LedgerError::Storage("pool exhausted".into()).into();
        match &api {
            ApiError::Internal(detail) => assert!(detail.contains("pool exhausted")),
            other => panic!("expected Internal, got {other:?}"),
        }
        assert_eq!(
            api.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_collect_details() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "must not be empty"))]
            name: String,
        }

        let err = Probe {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let api: ApiError = err.into();
        match api {
            ApiError::Validation { details, .. } => {
                assert_eq!(details, vec!["name: must not be empty"]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_phone_message_survives_mapping() {
        let api: ApiError = LedgerError::DuplicatePhone("0700111222".into()).into();
        assert!(api.to_string().contains("0700111222"));
    }
}
