//! Helper functions for setting up HTTP tests.

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState,
    auth::create_token,
    routing::build_router,
    user::{User, create_user},
};

/// Create an app state backed by a fresh in-memory database.
///
/// # Panics
///
/// Panics if the in-memory database could not be created or initialized.
pub fn new_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not create in-memory SQLite database");

    AppState::new(connection, "wowwhatasecret").expect("Could not create app state")
}

/// Create a test server serving the full application router over `state`.
pub fn get_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}

/// Register a user with `email` and the password `hunter2`, returning the
/// user and a valid auth token for them.
///
/// Uses a low bcrypt cost to keep tests fast.
///
/// # Panics
///
/// Panics if the user could not be created or the token could not be signed.
pub fn create_test_user(state: &AppState, email: &str) -> (User, String) {
    let password_hash = bcrypt::hash("hunter2", 4).expect("Could not hash password");
    let user = create_user(
        email,
        &password_hash,
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test user");
    let token = create_token(user.id, &state.encoding_key).expect("Could not create auth token");

    (user, token)
}
