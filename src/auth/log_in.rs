//! The route handler for logging in a registered user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use jsonwebtoken::EncodingKey;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{TokenResponse, create_token},
    user::get_user_by_email,
};

/// The state needed to log in a user.
#[derive(Clone)]
pub struct LogInState {
    /// The database connection for fetching users.
    db_connection: Arc<Mutex<Connection>>,
    /// The key used for signing auth tokens.
    encoding_key: EncodingKey,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            encoding_key: state.encoding_key.clone(),
        }
    }
}

/// The credentials a client must send to log in.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogInData {
    /// The email address the user registered with.
    pub email: String,
    /// The plain-text password. Verified against the stored hash, never logged.
    pub password: String,
}

/// A route handler for logging in a registered user.
///
/// Responds with an auth token when the credentials match a registered user.
/// An unknown email and a wrong password produce the same 401 response so the
/// client cannot probe for registered email addresses.
///
/// # Errors
///
/// This function will return an error if:
/// - the email does not belong to a registered user,
/// - the password is not correct,
/// - or an internal error occurred when verifying the password.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn log_in_endpoint(
    State(state): State<LogInState>,
    Json(credentials): Json<LogInData>,
) -> Result<Json<TokenResponse>, Error> {
    let user = get_user_by_email(
        &credentials.email,
        &state.db_connection.lock().unwrap(),
    )
    .map_err(|error| match error {
        Error::NotFound => Error::InvalidCredentials,
        error => error,
    })?;

    let is_password_valid = bcrypt::verify(&credentials.password, &user.password_hash)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_valid {
        return Err(Error::InvalidCredentials);
    }

    let token = create_token(user.id, &state.encoding_key)?;

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod log_in_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        auth::TokenResponse,
        endpoints,
        responses::ErrorBody,
        test_utils::{create_test_user, get_test_server, new_test_state},
    };

    #[tokio::test]
    async fn log_in_with_valid_credentials_responds_with_token() {
        let state = new_test_state();
        create_test_user(&state, "foo@bar.baz");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({"email": "foo@bar.baz", "password": "hunter2"}))
            .await;

        response.assert_status_ok();
        let body = response.json::<TokenResponse>();
        assert!(!body.token.is_empty());
    }

    #[tokio::test]
    async fn log_in_with_wrong_password_is_unauthorized() {
        let state = new_test_state();
        create_test_user(&state, "foo@bar.baz");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({"email": "foo@bar.baz", "password": "wrong"}))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<ErrorBody>(),
            ErrorBody::new("Invalid credentials")
        );
    }

    #[tokio::test]
    async fn log_in_with_unknown_email_gives_same_error_as_wrong_password() {
        let state = new_test_state();
        create_test_user(&state, "foo@bar.baz");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({"email": "qux@bar.baz", "password": "hunter2"}))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<ErrorBody>(),
            ErrorBody::new("Invalid credentials")
        );
    }
}
