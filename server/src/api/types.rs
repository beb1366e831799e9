//! Shared API types
//!
//! Error responses are plain text. JSON endpoints wrap their payload in
//! `{"data": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::data::PostgresError;
use crate::domain::AccountError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_postgres(e: PostgresError) -> Self {
        tracing::error!(error = %e, "Database error");
        Self::internal("Database operation failed")
    }

    pub fn from_accounts(e: AccountError) -> Self {
        tracing::error!(error = %e, "Account operation failed");
        Self::internal("Account operation failed")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PostgresError> for ApiError {
    fn from(e: PostgresError) -> Self {
        Self::from_postgres(e)
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        Self::from_accounts(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the logs
        let body = match self {
            Self::BadRequest { message } => message,
            Self::Internal { .. } => "Internal Server Error".to_string(),
        };
        (status, body).into_response()
    }
}

/// `{"data": [...]}` response wrapper
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

impl<T> DataResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}
