use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Stable error codes surfaced to the frontend for AI-related failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiErrorCode {
    ApiKeyMissing,
    InvalidApiKey,
    NetworkError,
    ModelNotFound,
    QuotaExceeded,
    Unknown,
}

impl AiErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiErrorCode::ApiKeyMissing => "API_KEY_MISSING",
            AiErrorCode::InvalidApiKey => "INVALID_API_KEY",
            AiErrorCode::NetworkError => "NETWORK_ERROR",
            AiErrorCode::ModelNotFound => "MODEL_NOT_FOUND",
            AiErrorCode::QuotaExceeded => "QUOTA_EXCEEDED",
            AiErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AiErrorCode::ApiKeyMissing
            | AiErrorCode::InvalidApiKey
            | AiErrorCode::NetworkError
            | AiErrorCode::ModelNotFound => StatusCode::SERVICE_UNAVAILABLE,
            AiErrorCode::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            AiErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    AiService {
        code: AiErrorCode,
        message: String,
        details: String,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn api_key_missing() -> Self {
        AppError::AiService {
            code: AiErrorCode::ApiKeyMissing,
            message: "AI service not configured. Please contact your administrator to set up the AI_API_KEY.".to_string(),
            details: "AI_API_KEY environment variable is not set".to_string(),
        }
    }

    /// Classifies an upstream model failure by keyword, mirroring the error
    /// copy the frontend keys its messaging off. Checked in order: credential
    /// problems, quota/rate limits, network faults, unknown model.
    pub fn from_ai_failure(details: String) -> Self {
        let lowered = details.to_lowercase();
        let (code, message) = if lowered.contains("api key")
            || lowered.contains("api_key")
            || lowered.contains("unauthorized")
            || lowered.contains("invalid authentication")
        {
            (
                AiErrorCode::InvalidApiKey,
                "Invalid API key. Please contact your administrator.".to_string(),
            )
        } else if lowered.contains("quota") || lowered.contains("limit") || lowered.contains("429")
        {
            (
                AiErrorCode::QuotaExceeded,
                "AI service quota exceeded. Please try again later or contact your administrator."
                    .to_string(),
            )
        } else if lowered.contains("network")
            || lowered.contains("connect")
            || lowered.contains("timed out")
            || lowered.contains("error sending request")
        {
            (
                AiErrorCode::NetworkError,
                "Network error. Please check your connection and try again.".to_string(),
            )
        } else if lowered.contains("not found") || lowered.contains("404") {
            (
                AiErrorCode::ModelNotFound,
                "AI model not found or not supported. Please contact your administrator to update the model configuration.".to_string(),
            )
        } else {
            (AiErrorCode::Unknown, details.clone())
        };

        AppError::AiService {
            code,
            message,
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::AiService { code, .. } => code.status_code(),
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => ErrorResponse {
                error: message.clone(),
                error_code: None,
                details: None,
            },
            AppError::AiService {
                code,
                message,
                details,
            } => ErrorResponse {
                error: message.clone(),
                error_code: Some(code.as_str()),
                details: Some(details.clone()),
            },
            AppError::DatabaseError(details) => ErrorResponse {
                error: "A database error occurred while processing the request".to_string(),
                error_code: None,
                details: Some(details.clone()),
            },
            AppError::InternalError(details) => ErrorResponse {
                error: "An unexpected error occurred while processing the request".to_string(),
                error_code: None,
                details: Some(details.clone()),
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
