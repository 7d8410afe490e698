//! `/api` forwarding
//!
//! Requests under the prefix are replayed against the API origin with the
//! prefix removed. Method, headers and body go through unchanged apart from
//! hop-by-hop headers; `Host` is taken from the upstream URL.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Path prefix routed to the API
pub const API_PREFIX: &str = "/api";

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

#[derive(Debug, Error)]
pub enum ProxyError {
    /// API_URL is not an absolute http(s) URL
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstream(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// The upstream request failed before a response arrived
    #[error("Upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidUpstream(_) | ProxyError::Client(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(error = %self, "Proxy error");

        let message = status.canonical_reason().unwrap_or("Proxy error");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Shared forwarding state
#[derive(Debug, Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    origin: String,
}

impl ProxyState {
    /// Build the forwarding state for an upstream such as `http://backend:3000`
    pub fn new(api_url: &str) -> Result<Self, ProxyError> {
        let url = reqwest::Url::parse(api_url)
            .map_err(|e| ProxyError::InvalidUpstream(format!("{}: {}", api_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidUpstream(format!(
                "{}: scheme must be http or https",
                api_url
            )));
        }

        // The proxy relays redirects instead of following them.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ProxyError::Client)?;

        Ok(Self {
            client,
            origin: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Upstream origin without a trailing slash
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Map an incoming URI to the upstream URL, dropping the `/api` prefix
    pub fn upstream_url(&self, uri: &Uri) -> String {
        let path = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path());
        let path = if path.is_empty() { "/" } else { path };

        let mut target = format!("{}{}", self.origin, path);
        if let Some(query) = uri.query() {
            target.push('?');
            target.push_str(query);
        }
        target
    }
}

fn strip_hop_by_hop(headers: &HeaderMap, drop_host: bool) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(*name);
    }
    if drop_host {
        out.remove(header::HOST);
    }
    out
}

/// Forward one request to the API and relay its response
pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let target = state.upstream_url(&uri);
    tracing::debug!(%method, from = %uri, to = %target, "Proxying request");

    let upstream = state
        .client
        .request(method, &target)
        .headers(strip_hop_by_hop(&headers, true))
        .body(body)
        .send()
        .await
        .map_err(ProxyError::Upstream)?;

    let status = upstream.status();
    let response_headers = strip_hop_by_hop(upstream.headers(), false);
    let bytes = upstream.bytes().await.map_err(ProxyError::Upstream)?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
