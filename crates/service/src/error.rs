//! What callers of the service see when a request fails.

use photospot_core::validation::{FieldError, ValidationFailure};
use photospot_core::ErrorCode;
use photospot_store::StoreError;
use photospot_telemetry::new_trace_id;
use serde::Serialize;
use thiserror::Error;

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request failure, already mapped to a client-facing category.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller sent bad input; every offending field is listed
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Absent, or present but not visible to this caller
    #[error("{resource} not found")]
    NotFound {
        /// Kind of record requested
        resource: &'static str,
    },

    /// Store failure; details stay in the logs under `trace_id`
    #[error("internal error (trace id {trace_id})")]
    Internal {
        /// Opaque id given to the client
        trace_id: String,
        /// Underlying failure
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    /// Not found for the given resource kind
    #[must_use]
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Wrap a store failure, logging it under a fresh trace id.
    #[must_use]
    pub fn internal(operation: &'static str, source: StoreError) -> Self {
        let trace_id = new_trace_id();
        tracing::error!(
            operation,
            trace_id = %trace_id,
            code = %source.code(),
            transient = source.is_transient(),
            error = %source.summary(),
            "Store operation failed"
        );
        metrics::counter!("photospot_store_failures_total", "operation" => operation).increment(1);
        Self::Internal { trace_id, source }
    }

    /// Validation failure on a single field
    #[must_use]
    pub fn invalid(error: FieldError) -> Self {
        Self::Validation(ValidationFailure::single(error))
    }

    /// HTTP status for this failure
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }

    /// Shared error code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Response body. Internal errors expose a generic message and the trace id only.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(failure) => ErrorBody {
                error: self.code(),
                message: "Request validation failed".to_string(),
                fields: Some(failure.errors.clone()),
                trace_id: None,
            },
            Self::NotFound { .. } => ErrorBody {
                error: self.code(),
                message: self.to_string(),
                fields: None,
                trace_id: None,
            },
            Self::Internal { trace_id, .. } => ErrorBody {
                error: self.code(),
                message: "Something went wrong. Please try again later.".to_string(),
                fields: None,
                trace_id: Some(trace_id.clone()),
            },
        }
    }
}

/// JSON error body: `{ error, message, fields?, trace_id? }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable category
    pub error: ErrorCode,
    /// Human-readable summary
    pub message: String,
    /// Every violated field rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
    /// Support correlation id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}
