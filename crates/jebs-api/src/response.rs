//! # Response Builder
//!
//! Uniform JSON responses and the cross-origin policy applied to all of them.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jebs_core::ApiError;
use serde::Serialize;
use tracing::warn;

pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Cross-origin headers for browser callers
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    /// Policy allowing `origin`. An origin that is not a valid header value
    /// falls back to `*`.
    pub fn new(origin: &str) -> Self {
        let allow_origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
            warn!("Invalid CORS_ORIGIN {:?}, falling back to *", origin);
            HeaderValue::from_static("*")
        });
        Self { allow_origin }
    }

    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// Attach the cross-origin headers
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new("*")
    }
}

/// Answers pre-flight requests before routing and adds the cross-origin
/// headers to every other response.
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        policy.apply(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}

/// Error body: exactly `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// What handlers return on failure
pub type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// `{"error": message}` with `Content-Type: application/json`
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorReply {
    (status, Json(ErrorResponse::new(message)))
}

/// Map an `ApiError` onto its status code and public message
pub fn api_error_response(err: &ApiError) -> ErrorReply {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, err.public_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_headers() {
        let mut headers = HeaderMap::new();
        CorsPolicy::new("https://jebs.example").apply(&mut headers);

        assert_eq!(headers["access-control-allow-origin"], "https://jebs.example");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[test]
    fn test_invalid_origin_falls_back_to_wildcard() {
        let policy = CorsPolicy::new("bad\norigin");
        assert_eq!(policy.allow_origin(), "*");
    }

    #[test]
    fn test_api_error_response() {
        let (status, Json(body)) = api_error_response(&ApiError::Validation(
            "lineItems required".to_string(),
        ));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "lineItems required");

        let (status, Json(body)) =
            api_error_response(&ApiError::provider("stripe", "Your card was declined."));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Your card was declined.");
    }

    #[test]
    fn test_error_reply_is_json() {
        let response = error_response(StatusCode::NOT_FOUND, "Not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }
}
