//! API gateway client: the one component allowed to talk to the backend.
//! Attaches bearer auth from the session store, normalizes the backend's
//! mixed response shapes, and classifies failures as network vs HTTP vs
//! application errors. Exactly one request per call; no retries, no caching.

use std::sync::Arc;

use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ApiGateway {
    base: Url,
    client: reqwest::Client,
    store: Arc<SessionStore>,
    /// Cookie header of the surrounding request, when running inside a
    /// server-rendered context; lets bearer resolution fall back to the
    /// mirror cookie when the durable store is empty.
    cookie_header: Option<String>,
}

impl ApiGateway {
    pub fn new(base: &str, store: Arc<SessionStore>) -> anyhow::Result<Self> {
        let base = Url::parse(base).context("invalid backend base origin")?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("building http client")?;
        Ok(Self { base, client, store, cookie_header: None })
    }

    /// Carry the surrounding request's Cookie header for bearer fallback.
    pub fn with_cookie_header(mut self, header: Option<String>) -> Self {
        self.cookie_header = header;
        self
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.dispatch_json(Method::GET, path, None::<&Value>).await
    }

    pub async fn get_with_query(&self, path: &str, pairs: &[(&str, &str)]) -> ApiResult<Value> {
        let full = join_query(path, pairs);
        self.dispatch_json(Method::GET, &full, None::<&Value>).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.dispatch_json(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.dispatch_json(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.dispatch_json(Method::DELETE, path, None::<&Value>).await
    }

    /// Multipart upload. Content-Type is left to reqwest so the multipart
    /// boundary is set by the runtime, never by hand.
    pub async fn post_form(&self, path: &str, form: reqwest::multipart::Form) -> ApiResult<Value> {
        let rb = self.request(Method::POST, path)?.multipart(form);
        self.execute(Method::POST, path, rb).await
    }

    pub async fn put_form(&self, path: &str, form: reqwest::multipart::Form) -> ApiResult<Value> {
        let rb = self.request(Method::PUT, path)?.multipart(form);
        self.execute(Method::PUT, path, rb).await
    }

    async fn dispatch_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Value> {
        let mut rb = self.request(method.clone(), path)?;
        if let Some(b) = body {
            rb = rb.json(b);
        }
        self.execute(method, path, rb).await
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ApiError::application(format!("invalid request path '{}': {}", path, e)))?;
        let mut rb = self
            .client
            .request(method, url)
            .header("x-request-id", Uuid::new_v4().to_string());
        if let Some(token) = self.store.bearer_token(self.cookie_header.as_deref()) {
            rb = rb.bearer_auth(token);
        }
        Ok(rb)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        rb: reqwest::RequestBuilder,
    ) -> ApiResult<Value> {
        let resp = match rb.send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(target: "gateway", "{} {} transport failure: {}", method, path, e);
                return Err(ApiError::unreachable(&e.to_string()));
            }
        };
        let status = resp.status();
        debug!(target: "gateway", "{} {} -> {}", method, path, status.as_u16());
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            let val: Value = match resp.json().await {
                Ok(v) => v,
                Err(e) => {
                    // Http is reserved for non-success statuses; a mangled body
                    // on a success status is an application-level failure.
                    let msg = format!("unreadable json body: {}", e);
                    return Err(if status.is_success() {
                        ApiError::application(msg)
                    } else {
                        ApiError::http(status.as_u16(), msg)
                    });
                }
            };
            if !status.is_success() {
                let msg = val
                    .get("error")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
                return Err(ApiError::application(msg));
            }
            // Returned exactly as sent; envelope discrimination is the
            // calling service's responsibility, not the gateway's.
            Ok(val)
        } else {
            let text = resp
                .text()
                .await
                .map_err(|e| ApiError::http(status.as_u16(), format!("unreadable body: {}", e)))?;
            if !status.is_success() {
                return Err(ApiError::http(status.as_u16(), text));
            }
            Ok(json!({ "message": text }))
        }
    }
}

fn join_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let qs = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, sep, qs)
}
