// HTTP transport seam. The token manager and the annotation client only
// describe requests; a `Transport` sends them. Production code uses the
// async reqwest client, tests plug in a recording fake.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart;
use reqwest::Client;
use thiserror::Error;

/// A file part for a multipart/form-data upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartFile {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Request body variants the service needs.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
    Multipart(MultipartFile),
}

/// A POST request, fully described before it reaches the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The client or request could not be built; nothing was sent.
    #[error("{0}")]
    Encoding(String),

    /// Sending the request or reading the response failed.
    #[error("{0}")]
    Network(String),
}

/// Sends a described request and hands back the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by an async `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with reqwest's default settings (no extra timeout).
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().build().map_err(classify)?;
        Ok(Self { client })
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Encoding(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Encoding(format!("invalid value for header {name}: {e}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let headers = Self::header_map(&request.headers)?;
        let builder = self.client.post(&request.url).headers(headers);

        let builder = match request.body {
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart(file) => {
                let part = multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)
                    .map_err(|e| TransportError::Encoding(format!("invalid mime type: {e}")))?;
                builder.multipart(multipart::Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(format!("failed to read response body: {e}")))?;

        tracing::debug!(url = %request.url, status, "request completed");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Builder errors never reached the wire; everything else did.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Encoding(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}
