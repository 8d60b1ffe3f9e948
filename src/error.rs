//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The message sent to the client for any error that is not the client's fault.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// The message sent to the client when a route does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The `month` query parameter was missing or was not an integer from 1 to 12.
    ///
    /// The string describes the problem and is safe to show to the client.
    #[error("{0}")]
    InvalidMonth(String),

    /// The query string could not be parsed, e.g. a parameter was given twice.
    ///
    /// The string describes the problem and is safe to show to the client.
    #[error("{0}")]
    InvalidQuery(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A query did not finish within the configured time limit.
    #[error("the database query timed out")]
    QueryTimeout,

    /// The blocking task running a query panicked or was cancelled.
    #[error("the database task failed: {0}")]
    TaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// A short, client-safe description of the error.
    pub error: String,
}

impl ErrorBody {
    /// Create an error response with `status_code` and `message` as the JSON body.
    pub fn response(status_code: StatusCode, message: &str) -> Response {
        (
            status_code,
            Json(ErrorBody {
                error: message.to_owned(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidMonth(message) | Error::InvalidQuery(message) => {
                ErrorBody::response(StatusCode::BAD_REQUEST, &message)
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            // This is the only place server errors are logged.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorBody::response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR_MESSAGE,
                )
            }
        }
    }
}
