//! Shared helpers: a mock server on a random port and a ureq-backed
//! transport executing requests the way a host application would.

#![allow(dead_code)]

use trello_core::{ApiError, HttpBody, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Start the mock server on a random port and return its base URL.
pub fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Executes `HttpRequest`s with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data and the client interprets them.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, &req.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&req.url);
                for (k, v) in &req.query {
                    builder = builder.query(k, v);
                }
                builder.call()
            }
            (method, body) => {
                let mut builder = match method {
                    HttpMethod::Put => self.agent.put(&req.url),
                    _ => self.agent.post(&req.url),
                };
                for (k, v) in &req.query {
                    builder = builder.query(k, v);
                }
                match body {
                    HttpBody::Empty => builder.send_empty(),
                    HttpBody::Form(fields) => {
                        builder.send_form(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                    }
                    HttpBody::Json(json) => {
                        builder.content_type("application/json").send(json.as_bytes())
                    }
                    HttpBody::Multipart { .. } => {
                        return Err(ApiError::Transport(
                            "multipart is not supported by this transport".to_string(),
                        ))
                    }
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse { status, headers, body })
    }
}
