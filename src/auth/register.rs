//! The route handler for registering a new user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use jsonwebtoken::EncodingKey;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{TokenResponse, create_token},
    user::create_user,
};

/// The state needed to register a user.
#[derive(Clone)]
pub struct RegisterState {
    /// The database connection for creating users.
    db_connection: Arc<Mutex<Connection>>,
    /// The key used for signing auth tokens.
    encoding_key: EncodingKey,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            encoding_key: state.encoding_key.clone(),
        }
    }
}

/// The data a client must send to register.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterData {
    /// The email address to register with.
    pub email: String,
    /// The plain-text password. Hashed before storage, never logged.
    pub password: String,
}

/// A route handler for registering a new user.
///
/// Responds with 201 and an auth token on success, or 400 when the email is
/// already registered.
///
/// # Errors
///
/// This function will return an error if:
/// - the email is already registered,
/// - the password could not be hashed,
/// - or there was an error accessing the database.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn register_endpoint(
    State(state): State<RegisterState>,
    Json(registration): Json<RegisterData>,
) -> Result<(StatusCode, Json<TokenResponse>), Error> {
    let password_hash = bcrypt::hash(&registration.password, bcrypt::DEFAULT_COST)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    let user = create_user(
        &registration.email,
        &password_hash,
        &state.db_connection.lock().unwrap(),
    )?;

    let token = create_token(user.id, &state.encoding_key)?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
