//! Authenticated HTTP wrapper around the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through `ApiClient`: it attaches the bearer token,
//! performs at most one silent refresh on a 401 from a non-auth endpoint,
//! retries once, and normalizes failures into `ApiError`.
//!
//! Client-side (hydrate): real HTTP via `gloo-net`.
//! Server-side (SSR): `BrowserTransport` answers `ApiError::Unavailable`
//! since these endpoints are only meaningful in the browser.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::RefreshResponse;
use crate::util::storage::{BrowserStorage, KeyValueStorage, TokenStore};

pub const REFRESH_ENDPOINT: &str = "/auth/refresh-token";
pub const LOGIN_ROUTE: &str = "/login";

/// Backend base URL, fixed at build time. Defaults to the host's `/api` proxy.
#[must_use]
pub fn api_base_url() -> &'static str {
    option_env!("PORTAL_API_BASE_URL")
        .unwrap_or("/api")
        .trim_end_matches('/')
}

/// Auth endpoints never trigger a refresh (login failures are real 401s).
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    path == "/auth" || path.starts_with("/auth/") || path.starts_with("/auth?")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A file read into memory for a multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    /// Pre-serialized JSON text.
    Json(String),
    Multipart(Vec<FormPart>),
}

/// One outbound request, path relative to the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
    pub bearer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and reports the raw status + body.
///
/// `Err` is reserved for "no response received".
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

/// `fetch`-backed transport for the browser.
#[derive(Clone, Debug)]
pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }
}

impl Transport for BrowserTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            send_with_gloo(&self.base_url, request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.base_url, request);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn send_with_gloo(base_url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    use gloo_net::http::Request;

    let url = format!("{base_url}{}", request.path);
    let mut builder = match request.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Patch => Request::patch(&url),
        Method::Delete => Request::delete(&url),
    }
    .header("Accept", "application/json");
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }

    let prepared = match &request.body {
        None => builder.build(),
        Some(RequestBody::Json(json)) => builder.header("Content-Type", "application/json").body(json.as_str()),
        Some(RequestBody::Multipart(parts)) => builder.body(form_data(parts)?),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}

#[cfg(feature = "hydrate")]
fn form_data(parts: &[FormPart]) -> Result<web_sys::FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Network(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value).map_err(js_err)?,
            FormPart::File { name, file } => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let blob_parts = js_sys::Array::of1(&bytes);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
                    .map_err(js_err)?;
                form.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form)
}

/// Navigate the whole page to the login route.
pub fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_ROUTE);
        }
    }
}

/// Bearer-authenticated JSON client with single-shot token refresh.
pub struct ApiClient<T, S> {
    transport: T,
    tokens: TokenStore<S>,
    on_session_expired: Rc<dyn Fn()>,
    refresh: RefCell<RefreshGate>,
}

/// Single-flight state for the refresh exchange.
///
/// Refresh tokens rotate on use, so concurrent 401s must share one exchange.
#[derive(Default)]
struct RefreshGate {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Option<String>>>,
}

/// Held by the caller running the exchange; hands its outcome to every waiter
/// when dropped, including when the exchange future is cancelled.
struct RefreshLead<'a> {
    gate: &'a RefCell<RefreshGate>,
    outcome: Option<String>,
}

impl Drop for RefreshLead<'_> {
    fn drop(&mut self) {
        let waiters = {
            let mut gate = self.gate.borrow_mut();
            gate.in_flight = false;
            std::mem::take(&mut gate.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(self.outcome.clone());
        }
    }
}

/// The client every page uses.
pub type PortalApi = ApiClient<BrowserTransport, BrowserStorage>;

impl PortalApi {
    #[must_use]
    pub fn browser() -> Self {
        ApiClient::new(BrowserTransport::new(api_base_url()), TokenStore::browser(), Rc::new(redirect_to_login))
    }
}

impl<T: Transport, S: KeyValueStorage> ApiClient<T, S> {
    pub fn new(transport: T, tokens: TokenStore<S>, on_session_expired: Rc<dyn Fn()>) -> Self {
        Self { transport, tokens, on_session_expired, refresh: RefCell::default() }
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    #[cfg(test)]
    pub(crate) fn transport_ref(&self) -> &T {
        &self.transport
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError` for transport, status, or decode failures.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let resp = self.send_authorized(Method::Get, path, None).await?;
        decode(&resp)
    }

    /// Send `body` as JSON with `method` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError` for transport, status, or decode failures.
    pub async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = self.send_authorized(method, path, Some(RequestBody::Json(json))).await?;
        decode(&resp)
    }

    /// Send a request and only check for success, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError` for transport or status failures.
    pub async fn execute(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<(), ApiError> {
        let body = body.map(|v| RequestBody::Json(v.to_string()));
        self.send_authorized(method, path, body).await.map(|_| ())
    }

    /// `POST` a multipart form and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError` for transport, status, or decode failures.
    pub async fn upload<R: DeserializeOwned>(&self, path: &str, parts: Vec<FormPart>) -> Result<R, ApiError> {
        let resp = self
            .send_authorized(Method::Post, path, Some(RequestBody::Multipart(parts)))
            .await?;
        decode(&resp)
    }

    async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest { method, path: path.to_owned(), body, bearer: self.tokens.access_token() };
        let response = self.transport.send(&request).await?;
        if response.status != 401 || is_auth_endpoint(path) {
            return ensure_success(response);
        }

        // Another request may have refreshed while this one was in flight.
        let token = match self.tokens.access_token() {
            Some(current) if request.bearer.as_ref() != Some(&current) => current,
            _ => self.refresh_session().await?,
        };
        request.bearer = Some(token);
        let retried = self.transport.send(&request).await?;
        ensure_success(retried)
    }

    /// Exchange the stored refresh token for a new access token, joining an
    /// exchange that is already running instead of starting a second one.
    async fn refresh_session(&self) -> Result<String, ApiError> {
        let waiting = {
            let mut gate = self.refresh.borrow_mut();
            if gate.in_flight {
                let (tx, rx) = oneshot::channel();
                gate.waiters.push(tx);
                Some(rx)
            } else {
                gate.in_flight = true;
                None
            }
        };
        if let Some(rx) = waiting {
            // The lead already expired the session on failure.
            return rx.await.ok().flatten().ok_or(ApiError::SessionExpired);
        }

        let mut lead = RefreshLead { gate: &self.refresh, outcome: None };
        match self.exchange_refresh_token().await {
            Some(token) => {
                lead.outcome = Some(token.clone());
                Ok(token)
            }
            None => Err(self.expire_session()),
        }
    }

    async fn exchange_refresh_token(&self) -> Option<String> {
        let refresh_token = self.tokens.refresh_token()?;

        let body = serde_json::json!({ "refreshToken": refresh_token }).to_string();
        let request = HttpRequest {
            method: Method::Post,
            path: REFRESH_ENDPOINT.to_owned(),
            body: Some(RequestBody::Json(body)),
            bearer: None,
        };
        let refreshed = match self.transport.send(&request).await {
            Ok(resp) if resp.is_success() => decode::<RefreshResponse>(&resp).ok(),
            Ok(resp) => {
                leptos::logging::warn!("token refresh rejected: status={}", resp.status);
                None
            }
            Err(e) => {
                leptos::logging::warn!("token refresh failed: {e}");
                None
            }
        }?;

        self.tokens.update(&refreshed.token, refreshed.refresh_token.as_deref());
        Some(refreshed.token)
    }

    fn expire_session(&self) -> ApiError {
        self.tokens.clear();
        (self.on_session_expired)();
        ApiError::SessionExpired
    }
}

fn ensure_success(resp: HttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(ApiError::from_response(resp.status, &resp.body))
    }
}

/// Decode a JSON body, unwrapping a `{ "data": ... }` envelope when present.
///
/// The envelope is tried first: DTOs with all-default fields would otherwise
/// accept the envelope itself and come back empty.
fn decode<R: DeserializeOwned>(resp: &HttpResponse) -> Result<R, ApiError> {
    let body = if resp.body.trim().is_empty() { "null" } else { resp.body.as_str() };
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if let Some(inner) = value.get("data") {
        if let Ok(decoded) = serde_json::from_value::<R>(inner.clone()) {
            return Ok(decoded);
        }
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
