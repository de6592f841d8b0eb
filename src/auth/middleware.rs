//! Authentication middleware that resolves bearer tokens to user IDs.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::DecodingKey;

use crate::{AppState, Error, auth::decode_token};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key used for verifying auth tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.decoding_key.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token in the
/// `Authorization` header.
///
/// The user ID is placed into the request and then the request executed
/// normally if the token is valid, otherwise a 401 response is returned and
/// the handler never runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let bearer = match TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &())
        .await
    {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(_) => return Error::InvalidAuthToken.into_response(),
    };

    let user_id = match decode_token(bearer.token(), &state.decoding_key) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(user_id);
    next.run(Request::from_parts(parts, body)).await
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use jsonwebtoken::{DecodingKey, EncodingKey};

    use crate::{
        auth::{AuthState, auth_guard, create_token},
        user::UserID,
    };

    const TEST_SECRET: &[u8] = b"nafstenoas";
    const TEST_PROTECTED_ROUTE: &str = "/protected";

    async fn test_handler(Extension(user_id): Extension<UserID>) -> String {
        format!("user {user_id}")
    }

    fn get_test_server() -> TestServer {
        let state = AuthState {
            decoding_key: DecodingKey::from_secret(TEST_SECRET),
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

        TestServer::new(app)
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_token() {
        let server = get_test_server();
        let token = create_token(UserID::new(7), &EncodingKey::from_secret(TEST_SECRET)).unwrap();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status_ok();
        response.assert_text("user 7");
    }

    #[tokio::test]
    async fn get_protected_route_without_token_is_unauthorized() {
        let server = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_invalid_token_is_unauthorized() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", "Bearer FOOBAR")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_token_signed_by_other_key_is_unauthorized() {
        let server = get_test_server();
        let token =
            create_token(UserID::new(7), &EncodingKey::from_secret(b"another secret")).unwrap();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
