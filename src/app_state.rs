//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The key used for signing auth tokens.
    pub encoding_key: EncodingKey,

    /// The key used for verifying auth tokens.
    pub decoding_key: DecodingKey,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models. `token_secret` is the secret used to sign and verify
    /// auth tokens.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, token_secret: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(token_secret.as_bytes()),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
