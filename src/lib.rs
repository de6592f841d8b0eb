//! Expenseur is a personal finance tracker for recording expenses and income.
//!
//! This library provides a JSON REST API with routes for auth, expenses,
//! income, and analytics, backed by a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod analytics;
mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod income;
mod logging;
mod responses;
mod routing;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use user::{User, UserID, get_user_by_email};

use crate::responses::ErrorBody;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email and password combination that does not
    /// match a registered user.
    ///
    /// The error message is the same whether the email is unknown or the
    /// password is wrong, so that the client cannot probe for registered
    /// email addresses.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token in the request is missing, malformed, expired, or
    /// not signed with the server's key.
    #[error("the authorization token is missing or invalid")]
    InvalidAuthToken,

    /// An unexpected error occurred while signing an auth token.
    #[error("could not create auth token: {0}")]
    TokenCreation(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email used to register already belongs to another user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an expense that does not exist or belongs to another user
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// Tried to delete an income record that does not exist or belongs to another user
    #[error("tried to delete an income record that is not in the database")]
    DeleteMissingIncome,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("Invalid credentials"),
            ),
            Error::InvalidAuthToken => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("Authorization denied"),
            ),
            Error::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("User already exists"),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("The requested resource could not be found"),
            ),
            Error::DeleteMissingExpense => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Expense not found"))
            }
            Error::DeleteMissingIncome => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Income not found"))
            }
            // Any errors that are not handled above are not intended to be
            // shown to the client in detail.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_detail("Server error", &error.to_string()),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
