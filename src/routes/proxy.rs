//! `/api/*` pass-through to the REST backend.
//!
//! Only the headers the client actually sends are forwarded upstream, and only
//! `Content-Type` comes back. Transport failures become a JSON `{message}`
//! body so the client's error normalization treats them like backend errors.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::Bytes;
use axum::extract::{OriginalUri, RawQuery, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;

const FORWARDED_HEADERS: [header::HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

#[derive(Debug, Serialize)]
struct ProxyError {
    message: &'static str,
}

/// Join the backend base URL, the captured path, and the raw query string.
#[must_use]
pub fn upstream_url(backend_url: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", backend_url.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Backend-relative path from the raw request URI.
///
/// Taken undecoded so escapes inside a segment (`a%2Fb`) stay one segment.
#[must_use]
pub fn raw_api_path(uri_path: &str) -> &str {
    uri_path.strip_prefix("/api/").unwrap_or_else(|| uri_path.trim_start_matches('/'))
}

/// Copy the allow-listed request headers.
#[must_use]
pub fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in &FORWARDED_HEADERS {
        if let Some(value) = incoming.get(name) {
            out.insert(name.clone(), value.clone());
        }
    }
    out
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, axum::Json(ProxyError { message })).into_response()
}

pub async fn forward(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    let url = upstream_url(&state.config.backend_url, raw_api_path(uri.path()), query.as_deref());
    tracing::debug!(%request_id, %method, %url, "proxying api request");

    let upstream = state
        .http
        .request(method.clone(), &url)
        .headers(forwarded_headers(&headers))
        .body(body)
        .send()
        .await;

    let resp = match upstream {
        Ok(resp) => resp,
        Err(e) if e.is_timeout() => {
            tracing::warn!(%request_id, %method, %url, error = %e, "backend timed out");
            return error_response(StatusCode::GATEWAY_TIMEOUT, "The server took too long to respond. Please try again.");
        }
        Err(e) => {
            tracing::warn!(%request_id, %method, %url, error = %e, "backend unreachable");
            return error_response(StatusCode::BAD_GATEWAY, "Unable to reach the server. Please try again.");
        }
    };

    let status = resp.status();
    let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%request_id, %url, error = %e, "backend response body failed");
            return error_response(StatusCode::BAD_GATEWAY, "Unable to reach the server. Please try again.");
        }
    };
    if status.is_server_error() {
        tracing::warn!(%request_id, %method, %url, status = status.as_u16(), "backend error");
    }

    let mut out = (status, bytes).into_response();
    out.headers_mut().insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    out
}
