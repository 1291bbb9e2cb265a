// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use crate::validation::ConstraintFault;

/// API error types
///
/// Validation violations and missing mutation targets are not errors; they
/// are rendered from an `Outcome`. These variants cover everything else.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    InternalServer(String),
    DatabaseError(sqlx::Error),
    ConstraintFault(ConstraintFault),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::ConstraintFault(fault) => write!(f, "Constraint Fault: {}", fault),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT"),
            ApiError::InternalServer(msg) => {
                error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    "INTERNAL_SERVER_ERROR",
                )
            }
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
            ApiError::ConstraintFault(fault) => {
                error!(
                    field = %fault.field,
                    constraint = fault.constraint,
                    error = %fault.source,
                    "Validation could not be completed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Validation could not be completed".to_string(),
                    "CONSTRAINT_EVALUATION_FAULT",
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::DatabaseError(e)
    }
}

impl From<ConstraintFault> for ApiError {
    fn from(fault: ConstraintFault) -> Self {
        ApiError::ConstraintFault(fault)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::LookupError;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_constraint_fault_is_a_server_error() {
        let fault = ConstraintFault {
            field: "name".to_string(),
            constraint: "uniqueness",
            source: LookupError::Database(sqlx::Error::PoolClosed),
        };

        let (status, body) = body_json(ApiError::from(fault)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "CONSTRAINT_EVALUATION_FAULT");
        assert_eq!(body["error"], "Validation could not be completed");
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let (status, body) =
            body_json(ApiError::Conflict("Bird name already exists".to_string())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Bird name already exists");
        assert_eq!(body["code"], "CONFLICT");
    }
}
