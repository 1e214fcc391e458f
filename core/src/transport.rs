//! The network seam.
//!
//! A `Transport` executes a prepared `HttpRequest` and reports whatever the
//! server answered. It never interprets status codes and only fails when no
//! response could be obtained at all.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;

use crate::error::{ApiError, Result};
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};

/// Boxed future returned by `Transport::execute_async`.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + 'static>>;

/// Executes prepared requests.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;

    /// Execute without blocking the calling task. The default runs `execute`
    /// on Tokio's blocking pool, so it must be polled inside a Tokio runtime.
    fn execute_async(self: Arc<Self>, request: HttpRequest) -> ResponseFuture {
        Box::pin(async move {
            tokio::task::spawn_blocking(move || self.execute(&request))
                .await
                .map_err(|e| ApiError::Join(e.to_string()))?
        })
    }
}

/// Default transport over an async `reqwest` client.
///
/// `execute_async` sends on the caller's runtime through a pooled client.
/// `execute` drives the request to completion on a private current-thread
/// runtime. When the caller is already inside a Tokio runtime, that private
/// runtime lives on a scoped thread, so synchronous navigation can be called
/// from async code. The calling thread is blocked meanwhile.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    /// Used by `execute`; keeps no idle connections because each call runs
    /// on a runtime that is dropped right after.
    oneshot: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::with_client(client)
    }

    /// Use `client` for async requests.
    pub fn with_client(client: reqwest::Client) -> Result<Self> {
        let oneshot = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, oneshot })
    }

    fn block_on_send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        runtime.block_on(send(build(&self.oneshot, request)))
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_send(request);
        }
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.block_on_send(request))
                .join()
                .map_err(|_| ApiError::Join("request thread panicked".to_string()))?
        })
    }

    fn execute_async(self: Arc<Self>, request: HttpRequest) -> ResponseFuture {
        Box::pin(async move { send(build(&self.client, &request)).await })
    }
}

fn build(client: &reqwest::Client, request: &HttpRequest) -> reqwest::RequestBuilder {
    let method = match request.method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
    };
    let builder = client.request(method, &request.url).query(&request.query);

    match &request.body {
        HttpBody::Empty => builder,
        HttpBody::Form(fields) => builder.form(fields),
        HttpBody::Json(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(body.clone()),
        HttpBody::Multipart { fields, file } => {
            let mut form = multipart::Form::new();
            for (name, value) in fields {
                form = form.text(name.clone(), value.clone());
            }
            let part =
                multipart::Part::bytes(file.contents.clone()).file_name(file.file_name.clone());
            builder.multipart(form.part(file.field.clone(), part))
        }
    }
}

async fn send(builder: reqwest::RequestBuilder) -> Result<HttpResponse> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
