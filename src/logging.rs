//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
///
/// Password fields in JSON request bodies are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    let is_json = headers
        .headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"));

    if is_json {
        let display_text = redact_password(&body_text, "password");
        log_request(&headers, &display_text);
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

/// Replace the value of the JSON string field `field_name` with asterisks.
///
/// The body is treated as plain text rather than parsed, so that invalid JSON
/// still gets logged (redacted) instead of dropped.
fn redact_password(body_text: &str, field_name: &str) -> String {
    let field_prefix = format!("\"{field_name}\"");

    let Some(field_start) = body_text.find(&field_prefix) else {
        return body_text.to_string();
    };

    let value_search_start = field_start + field_prefix.len();
    let Some(value_offset) = body_text[value_search_start..].find('"') else {
        return body_text.to_string();
    };
    let value_start = value_search_start + value_offset + 1;

    let mut value_end = value_start;
    let mut previous_was_backslash = false;
    for (offset, character) in body_text[value_start..].char_indices() {
        if character == '"' && !previous_was_backslash {
            value_end = value_start + offset;
            break;
        }

        previous_was_backslash = character == '\\' && !previous_was_backslash;
        value_end = value_start + offset + character.len_utf8();
    }

    format!(
        "{}********{}",
        &body_text[..value_start],
        &body_text[value_end..]
    )
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

/// How many bytes of a body are logged at the `info` level before the rest is
/// deferred to the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Truncate `body` to at most `limit` bytes without splitting a multi-byte
/// character. Bodies carry arbitrary user text, so byte 64 can land inside a
/// character.
fn truncate_on_char_boundary(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate_on_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate_on_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}


#[cfg(test)]
mod truncation_tests {
    use super::{LOG_BODY_LENGTH_LIMIT, log_request, truncate_on_char_boundary};

    #[test]
    fn leaves_short_body_untouched() {
        assert_eq!(truncate_on_char_boundary("short", 64), "short");
    }

    #[test]
    fn truncates_ascii_body_at_limit() {
        let body = "a".repeat(100);

        let got = truncate_on_char_boundary(&body, 64);

        assert_eq!(got.len(), 64);
    }

    #[test]
    fn backs_up_when_limit_splits_a_character() {
        // "é" is two bytes and spans the limit.
        let body = format!("{}é and the rest", "a".repeat(63));

        let got = truncate_on_char_boundary(&body, 64);

        assert_eq!(got, "a".repeat(63));
    }

    #[test]
    fn log_request_handles_multibyte_body_at_the_limit() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .finish();
        let (parts, _body) = axum::http::Request::new(()).into_parts();
        let body = format!("{}é tail that pushes past the limit", "a".repeat(LOG_BODY_LENGTH_LIMIT - 1));

        tracing::subscriber::with_default(subscriber, || log_request(&parts, &body));
    }
}
