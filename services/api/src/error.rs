use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// One failed field constraint in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Api service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("guest not found")]
    GuestNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
    #[error("provider exchange failed")]
    ProviderExchange(#[source] anyhow::Error),
    #[error("conflict")]
    Conflict,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::GuestNotFound => "GUEST_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnsupportedProvider(_) => "UNSUPPORTED_PROVIDER",
            Self::ProviderExchange(_) => "PROVIDER_EXCHANGE",
            Self::Conflict => "CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::GuestNotFound | Self::UserNotFound | Self::UnsupportedProvider(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ProviderExchange(_) => StatusCode::BAD_GATEWAY,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only; 4xx are expected client errors and would be noise here.
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::ProviderExchange(e) => {
                tracing::error!(error = %e, kind = "PROVIDER_EXCHANGE", "provider exchange failed")
            }
            _ => {}
        }
        let body = match &self {
            Self::Validation(fields) => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
                "fields": fields,
            }),
            _ => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
