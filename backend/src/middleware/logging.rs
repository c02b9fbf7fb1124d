use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_LENGTH, Request},
    middleware::Next,
    response::Response,
    Error as AxumError,
};
use std::time::Instant;

use super::request_id::RequestId;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 2048;

/// Logs every 4xx/5xx response together with the request id and a preview of
/// the body. The body is buffered and handed on to the caller unchanged.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().path().to_string();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "-".to_string());
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let event = ErrorEvent {
        status: status.as_u16(),
        method: &method,
        uri: &uri,
        request_id: &request_id,
        latency_ms: start.elapsed().as_millis() as u64,
    };
    let (mut parts, body) = response.into_parts();
    match buffer_body(body).await {
        Ok((bytes, preview)) => {
            event.log(&preview, None);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            parts.headers.remove(CONTENT_LENGTH);
            event.log("", Some(err));
            Response::from_parts(parts, Body::empty())
        }
    }
}

async fn buffer_body(body: Body) -> Result<(Bytes, String), AxumError> {
    let bytes = to_bytes(body, MAX_BUFFERED_BODY_BYTES).await?;
    let preview = if bytes.len() > MAX_LOGGED_BODY_BYTES {
        let slice = bytes.slice(0..MAX_LOGGED_BODY_BYTES);
        format!(
            "{}... (truncated, {} bytes total)",
            String::from_utf8_lossy(&slice),
            bytes.len()
        )
    } else {
        String::from_utf8_lossy(&bytes).to_string()
    };
    Ok((bytes, preview))
}

struct ErrorEvent<'a> {
    status: u16,
    method: &'a str,
    uri: &'a str,
    request_id: &'a str,
    latency_ms: u64,
}

impl ErrorEvent<'_> {
    fn log(&self, body_preview: &str, body_error: Option<AxumError>) {
        let Self {
            status,
            method,
            uri,
            request_id,
            latency_ms,
        } = *self;
        match (status >= 500, body_error) {
            (true, Some(err)) => tracing::error!(
                status, method, uri, request_id, latency_ms, error = ?err,
                "Failed to read error response body"
            ),
            (false, Some(err)) => tracing::warn!(
                status, method, uri, request_id, latency_ms, error = ?err,
                "Failed to read error response body"
            ),
            (true, None) => tracing::error!(
                status, method, uri, request_id, latency_ms, body = body_preview,
                "Request completed with error status"
            ),
            (false, None) => tracing::warn!(
                status, method, uri, request_id, latency_ms, body = body_preview,
                "Request completed with error status"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn error_bodies_are_forwarded_unchanged() {
        let app = Router::new()
            .route(
                "/fail",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "{\"error\":\"Logout failed\"}",
                    )
                }),
            )
            .layer(axum::middleware::from_fn(log_error_responses));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/fail")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&bytes[..], b"{\"error\":\"Logout failed\"}");
    }

    #[tokio::test]
    async fn large_bodies_are_truncated_in_preview_only() {
        let body = "x".repeat(MAX_LOGGED_BODY_BYTES + 10);
        let (bytes, preview) = buffer_body(Body::from(body.clone())).await.expect("buffer");
        assert_eq!(bytes.len(), body.len());
        assert!(preview.contains("truncated"));
    }
}
