//! Errors raised by the question and choice storage functions.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    /// Record kind and id that could not be found
    #[error("{0} {1} not found")]
    NotFound(&'static str, i32),
    #[error("{0}")]
    Validation(String),
}

impl ResponseError for PollError {
    fn status_code(&self) -> StatusCode {
        match self {
            PollError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PollError::NotFound(..) => StatusCode::NOT_FOUND,
            PollError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let PollError::Database(err) = self {
            log::error!("Database error: {}", err);
            return HttpResponse::InternalServerError().body("Internal Server Error");
        }
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Trim `text` and check it fits a question or choice text column.
pub fn validate_text(field: &str, text: &str) -> Result<String, PollError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PollError::Validation(format!("{} must not be empty.", field)));
    }

    let max_length = crate::constants::MAX_TEXT_LENGTH;
    let length = text.chars().count();
    if length > max_length {
        return Err(PollError::Validation(format!(
            "{} is too long. Maximum length is {} characters, but it is {} characters.",
            field, max_length, length
        )));
    }

    Ok(text.to_owned())
}
