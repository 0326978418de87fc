use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum AppErrorType {
    NotFoundError,
    ConflictError,
    PreconditionFailed,
    PayloadValidationError,
    AuthError,
    DbError,
    InternalServerError,
}

#[derive(Debug, PartialEq)]
pub struct AppError {
    pub error_type: AppErrorType,
    pub message: Option<String>,
    pub cause: Option<String>,
}

#[derive(Serialize)]
pub struct AppErrorResponse {
    pub success: bool,
    pub message: String,
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            // storage detail stays in `cause` and the logs
            AppError {
                error_type: AppErrorType::DbError | AppErrorType::InternalServerError,
                ..
            } => "Server error".to_string(),

            AppError {
                message: Some(message),
                ..
            } => message.clone(),

            AppError {
                message: None,
                error_type: AppErrorType::NotFoundError,
                ..
            } => "The requested item was not found".to_string(),
            _ => "An unexpected error has occurred".to_string(),
        }
    }

    pub fn db_error(error: impl ToString) -> AppError {
        let cause = error.to_string();
        tracing::error!(error.cause_chain = %cause, "storage fault");
        AppError {
            cause: Some(cause),
            error_type: AppErrorType::DbError,
            message: None,
        }
    }

    pub fn not_found(message: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::NotFoundError,
            message: Some(message.to_string()),
        }
    }

    pub fn conflict(message: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::ConflictError,
            message: Some(message.to_string()),
        }
    }

    pub fn precondition_failed(message: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::PreconditionFailed,
            message: Some(message.to_string()),
        }
    }

    pub fn bad_request(message: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::PayloadValidationError,
            message: Some(message.to_string()),
        }
    }

    pub fn unauthorized(message: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::AuthError,
            message: Some(message.to_string()),
        }
    }

    pub fn internal_error(error: impl ToString) -> AppError {
        let cause = error.to_string();
        tracing::error!(error.cause_chain = %cause, "internal error");
        AppError {
            cause: Some(cause),
            error_type: AppErrorType::InternalServerError,
            message: None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        AppError::db_error(error)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flatten()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect::<Vec<_>>()
            .join(", ");

        AppError {
            cause: Some(errors.to_string()),
            error_type: AppErrorType::PayloadValidationError,
            message: Some(if message.is_empty() {
                "Invalid request payload".to_string()
            } else {
                message
            }),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            AppErrorType::AuthError => StatusCode::UNAUTHORIZED,
            AppErrorType::DbError | AppErrorType::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppErrorType::NotFoundError => StatusCode::NOT_FOUND,
            AppErrorType::ConflictError => StatusCode::CONFLICT,
            AppErrorType::PreconditionFailed | AppErrorType::PayloadValidationError => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(AppErrorResponse {
            success: false,
            message: self.message(),
        })
    }
}

#[derive(Serialize)]
pub struct AppSuccessResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> AppSuccessResponse<T> {
    pub fn new(data: T, message: impl ToString) -> Self {
        Self {
            success: true,
            data,
            message: message.to_string(),
        }
    }
}
