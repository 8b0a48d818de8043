use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::{ValidationErrors, ValidationErrorsKind};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request rejected: {1}")]
    Rejected(StatusCode, String),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                AppError::BadRequest(rejection.body_text())
            }
            other => AppError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { field, message } => {
                    (StatusCode::BAD_REQUEST, format!("`{field}` {message}"))
                }
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found".to_string()),
                DomainError::Unexpected(_) => {
                    error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_ERROR_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, first_message(&err)),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Rejected(status, message) => (status, message),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Picks one message out of `errors`, walking fields in name order so that the
/// response is stable when several fields are invalid at once.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(err) = errs.first() {
                    return match &err.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid `{field}` in request body"),
                    };
                }
            }
            ValidationErrorsKind::Struct(nested) => return first_message(nested),
            ValidationErrorsKind::List(items) => {
                if let Some(nested) = items.values().next() {
                    return first_message(nested);
                }
            }
        }
    }

    "Invalid request body".to_string()
}
