//! Request dispatch: prepare, execute, validate, decode.
//!
//! # Design
//! `TrelloClient` owns the transport, the application key and the current
//! `Authenticator`. Each call goes through the same steps:
//!
//! 1. `prepare` turns an `ApiRequest` into a plain-data `HttpRequest`,
//!    adding the `key` default parameter and, when authenticated, `token`.
//! 2. The transport executes it and returns an `HttpResponse` envelope.
//! 3. `check_response` maps the status: 404 on GET passes as empty, 401 is
//!    `Authentication`, anything else but 200 is `Request`.
//! 4. Typed calls decode the body; 404 becomes `None`.
//!
//! There is no retry, no caching and no timeout beyond the transport's own.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::auth::Authenticator;
use crate::bound::Bound;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{FilePart, HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::requests::{ApiBody, ApiRequest, FileSource, FileUpload};
use crate::transport::{ReqwestTransport, Transport};

/// Client shared by every entity it decodes.
///
/// `Sync`: it can sit behind an `Arc` and serve several threads. The token
/// is the only mutable state; swapping it while other threads are preparing
/// requests is a race the caller has to serialize.
pub struct TrelloClient {
    base_url: String,
    application_key: String,
    default_params: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
    authenticator: RwLock<Authenticator>,
}

impl TrelloClient {
    /// Client over the default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let default_params = vec![("key".to_string(), config.application_key.clone())];
        Self {
            base_url: config.normalized_base_url().to_string(),
            application_key: config.application_key,
            default_params,
            transport,
            authenticator: RwLock::new(Authenticator::Unauthenticated),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    pub fn authorize(&self, token: impl Into<String>) {
        self.set_authenticator(Authenticator::Authenticated {
            token: token.into(),
        });
    }

    pub fn deauthorize(&self) {
        self.set_authenticator(Authenticator::Unauthenticated);
    }

    pub fn authenticator(&self) -> Authenticator {
        self.authenticator
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticator().token().is_some()
    }

    fn set_authenticator(&self, authenticator: Authenticator) {
        let mut current = self
            .authenticator
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = authenticator;
    }

    // -----------------------------------------------------------------------
    // Preparation
    // -----------------------------------------------------------------------

    /// Build the wire form of `request` under the current authentication.
    pub fn prepare(&self, request: &ApiRequest) -> Result<HttpRequest> {
        let authenticator = self.authenticator();
        let url = format!("{}/{}", self.base_url, request.path());

        let mut query = self.default_params.clone();
        authenticator.apply(&mut query);

        let body = match &request.body {
            ApiBody::None if request.method == HttpMethod::Get => {
                query.extend(request.params.iter().cloned());
                HttpBody::Empty
            }
            ApiBody::None if request.params.is_empty() => HttpBody::Empty,
            ApiBody::None => HttpBody::Form(request.params.clone()),
            ApiBody::PutJson(object) => {
                query.extend(request.params.iter().cloned());
                self.put_body_with_credentials(object, &authenticator)?
            }
            ApiBody::File(upload) => HttpBody::Multipart {
                fields: request.params.clone(),
                file: read_upload(upload)?,
            },
        };

        Ok(HttpRequest {
            method: request.method,
            url,
            query,
            body,
        })
    }

    /// The API ignores query credentials on the custom-field PUT, so the key
    /// and token are written into the JSON body as well.
    fn put_body_with_credentials(
        &self,
        object: &serde_json::Map<String, Value>,
        authenticator: &Authenticator,
    ) -> Result<HttpBody> {
        let mut object = object.clone();
        object.insert(
            "key".to_string(),
            Value::String(self.application_key.clone()),
        );
        let token = authenticator
            .token()
            .map(|token| Value::String(token.to_string()))
            .unwrap_or(Value::Null);
        object.insert("token".to_string(), token);
        let json = serde_json::to_string(&object).map_err(ApiError::Serialization)?;
        Ok(HttpBody::Json(json))
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Prepare and execute without interpreting the status.
    pub fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        let prepared = self.prepare(request)?;
        debug!(method = %prepared.method, path = %request.template, "dispatching request");
        let response = self.transport.execute(&prepared)?;
        debug!(
            method = %prepared.method,
            path = %request.template,
            status = response.status,
            "received response"
        );
        Ok(response)
    }

    /// Fire, validate, discard the body.
    pub fn request(&self, request: &ApiRequest) -> Result<()> {
        let response = self.execute(request)?;
        check_response(request.method, &response)
    }

    /// Fire, validate, decode. A 404 yields `None`.
    pub fn request_for<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Option<T>> {
        let response = self.execute(request)?;
        check_response(request.method, &response)?;
        if response.status == 404 {
            trace!(path = %request.template, "not found, returning empty result");
            return Ok(None);
        }
        let value = serde_json::from_str(&response.body).map_err(ApiError::Deserialization)?;
        Ok(Some(value))
    }

    /// `request_for` with the decoded entity bound to this client.
    pub fn request_bound<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Option<Bound<'_, T>>> {
        Ok(self.request_for(request)?.map(|entity| self.bind(entity)))
    }

    /// `request_for` a sequence with every element bound to this client.
    /// A 404 yields an empty vector.
    pub fn request_all<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Vec<Bound<'_, T>>> {
        let entities: Vec<T> = self.request_for(request)?.unwrap_or_default();
        Ok(entities.into_iter().map(|entity| self.bind(entity)).collect())
    }

    pub fn bind<T>(&self, entity: T) -> Bound<'_, T> {
        Bound::new(self, entity)
    }

    /// Fire and validate without blocking the calling task.
    ///
    /// The request is prepared immediately, so it captures the token current
    /// at call time. The returned future must be polled inside a Tokio
    /// runtime. Dropping it abandons the response; the server may still have
    /// applied the change.
    pub fn request_async(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        let prepared = self.prepare(request);
        let transport = Arc::clone(&self.transport);
        let method = request.method;
        let template = request.template.clone();
        async move {
            let prepared = prepared?;
            debug!(method = %method, path = %template, "dispatching async request");
            let response = transport.execute_async(prepared).await?;
            check_response(method, &response)
        }
    }
}

impl std::fmt::Debug for TrelloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

/// Map status codes to `ApiError`. A 404 on GET is an empty result, not a
/// failure.
pub fn check_response(method: HttpMethod, response: &HttpResponse) -> Result<()> {
    if method == HttpMethod::Get && response.status == 404 {
        return Ok(());
    }
    if response.status == 401 {
        warn!(method = %method, "request rejected as unauthenticated");
        return Err(ApiError::Authentication {
            body: response.body.clone(),
        });
    }
    if response.status != 200 {
        warn!(method = %method, status = response.status, "request failed");
        return Err(ApiError::Request {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(())
}

fn read_upload(upload: &FileUpload) -> Result<FilePart> {
    let contents = match &upload.source {
        FileSource::Bytes(bytes) => bytes.clone(),
        FileSource::Path(path) => std::fs::read(path).map_err(|source| ApiError::Io {
            path: path.clone(),
            source,
        })?,
    };
    Ok(FilePart {
        field: upload.field.clone(),
        file_name: upload.file_name.clone(),
        contents,
    })
}
