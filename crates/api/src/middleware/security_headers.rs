//! Security headers middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// HSTS value sent when `security.hsts` is enabled.
pub const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Adds `nosniff`, frame denial and legacy XSS filtering to every response.
///
/// `Strict-Transport-Security` is only added when enabled in configuration,
/// since it must only be sent behind TLS termination.
pub async fn security_headers_middleware(
    State(hsts): State<bool>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );

    if hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        );
    }

    response
}
