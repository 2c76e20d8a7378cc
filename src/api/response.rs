//! Response types for the payroll engine API.
//!
//! This module defines the error body, the mapping from [`EngineError`] to
//! HTTP statuses, and the wrappers that add dates to reporting responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DisregardedPeriodEntry, PeriodRecord};
use crate::reporting::{AnnualSummary, RemittanceSummary};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidMonth { value } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_MONTH",
                    message,
                    format!("'{}' must be a month key in the form YYYY-MM", value),
                ),
            ),
            EngineError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::DuplicateRecord { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_RECORD", message),
            ),
            EngineError::EntryNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ENTRY_NOT_FOUND", message),
            ),
            EngineError::DuplicateDisregardedEntry { existing, .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_ENTRY",
                    message,
                    format!("Edit or delete entry {} instead", existing),
                ),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response for registry mutations: the entry affected and the record set
/// after recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryResponse {
    /// The entry as added, edited or deleted.
    pub entry: DisregardedPeriodEntry,
    /// All period records after the change.
    pub records: Vec<PeriodRecord>,
}

/// An annual summary with its IR56B filing deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummaryResponse {
    /// The summed figures.
    #[serde(flatten)]
    pub summary: AnnualSummary,
    /// When the employer's return for the span is due.
    pub ir56b_deadline: NaiveDate,
}

/// A remittance statement with its payment deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemittanceResponse {
    /// The statement.
    #[serde(flatten)]
    pub summary: RemittanceSummary,
    /// When the contributions must reach the trustee.
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_employee_not_found_is_404() {
        let api_error: ApiErrorResponse = EngineError::EmployeeNotFound {
            employee_id: "EMP404".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
        assert!(api_error.error.message.contains("EMP404"));
    }

    #[test]
    fn test_duplicate_entry_is_409() {
        let existing = Uuid::new_v4();
        let api_error: ApiErrorResponse = EngineError::DuplicateDisregardedEntry {
            employee_id: "EMP002".to_string(),
            month: "2025-06".to_string(),
            existing,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "DUPLICATE_ENTRY");
        assert!(api_error.error.details.unwrap().contains(&existing.to_string()));
    }

    #[test]
    fn test_invalid_month_is_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidMonth {
            value: "2025-13".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_MONTH");
    }

    #[test]
    fn test_invalid_period_is_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod {
            field: "total_days".to_string(),
            message: "must be at most 31, got 40".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
        assert!(api_error.error.message.contains("total_days"));
    }

    #[test]
    fn test_config_errors_are_500() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
