//! Defines how auth tokens are signed and verified.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserID};

/// The duration for which auth tokens are valid.
const TOKEN_DURATION: Duration = Duration::days(7);

/// The claims encoded into an auth token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The ID of the user the token was issued to.
    sub: i64,
    /// The expiry as a unix timestamp.
    exp: i64,
}

/// The JSON body returned by the register and log-in endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// A signed bearer token for the `Authorization` header.
    pub token: String,
}

/// Sign a token for `user_id` that expires [TOKEN_DURATION] from now.
///
/// # Errors
///
/// Returns an [Error::TokenCreation] if the token could not be signed.
pub(crate) fn create_token(
    user_id: UserID,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let expires_at = OffsetDateTime::now_utc() + TOKEN_DURATION;
    let claims = Claims {
        sub: user_id.as_i64(),
        exp: expires_at.unix_timestamp(),
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify `token` and extract the user ID it was issued to.
///
/// # Errors
///
/// Returns an [Error::InvalidAuthToken] if the token is malformed, expired,
/// or was not signed with the key matching `decoding_key`.
pub(crate) fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<UserID, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| UserID::new(token_data.claims.sub))
        .map_err(|_| Error::InvalidAuthToken)
}
