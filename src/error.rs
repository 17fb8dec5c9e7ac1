use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::duration::FormatError;
use crate::ledger::LedgerError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Configuration error
    ConfigError(String),
    /// Duration text could not be interpreted
    InvalidDuration(FormatError),
    /// Numeric input outside the accepted domain
    InvalidInput(String),
    /// G-code did not carry every marker needed for pricing
    MissingMetadata(Vec<&'static str>),
    /// Ledger read/write error
    LedgerError(LedgerError),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::InvalidDuration(err) => write!(f, "Invalid duration: {}", err),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::MissingMetadata(fields) => write!(
                f,
                "Could not extract {} from G-code; enter the values manually",
                fields.join(" and ")
            ),
            Self::LedgerError(err) => write!(f, "Ledger error: {}", err),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDuration(err) => Some(err),
            Self::LedgerError(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::InvalidDuration(err) => (StatusCode::BAD_REQUEST, err.user_message().to_string()),
            Self::InvalidInput(_) | Self::MissingMetadata(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Self::LedgerError(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

pub fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::InvalidDuration(_) => "invalid_duration",
        AppError::InvalidInput(_) => "invalid_input",
        AppError::MissingMetadata(_) => "missing_metadata",
        AppError::LedgerError(_) => "ledger_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<FormatError> for AppError {
    fn from(err: FormatError) -> Self {
        Self::InvalidDuration(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::LedgerError(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}
