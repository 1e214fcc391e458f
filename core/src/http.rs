//! HTTP transport types for the host-does-IO split.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The client
//! prepares `HttpRequest` values and interprets `HttpResponse` values; only a
//! `Transport` implementation touches the network. Keeping the exchange as
//! data is what lets tests assert on exactly what would go on the wire.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file uploaded as one part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field the file is sent under.
    pub field: String,
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// Request body as it will be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// Serialized JSON document.
    Json(String),
    /// `multipart/form-data` with text fields and a single file.
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already has its path segments substituted; `query`
/// holds every query-string pair in the order it will be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    /// First query value under `name`.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Form or multipart text fields, empty for other bodies.
    pub fn form_fields(&self) -> &[(String, String)] {
        match &self.body {
            HttpBody::Form(fields) | HttpBody::Multipart { fields, .. } => fields,
            HttpBody::Empty | HttpBody::Json(_) => &[],
        }
    }
}

/// An HTTP response described as plain data.
///
/// Returned by a `Transport` for every status code; interpreting the status
/// is the client's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
