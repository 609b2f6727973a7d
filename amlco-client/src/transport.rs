//! Request execution
//!
//! [`ApiClient`](crate::ApiClient) describes calls as [`ApiRequest`] values and hands them to a
//! [`Transport`]. Status codes are not interpreted here; that is the client's job.

use crate::error::ApiError;
use crate::files::UploadFile;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Multipart form with a single `file` field
    File(UploadFile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, starting with `/api/`
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, RequestBody::Empty)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, RequestBody::Empty)
    }

    pub fn new(method: Method, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests against some backend.
pub trait Transport {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&base_url).map_err(|e| {
            ApiError::InvalidConfig(format!("Invalid API base URL '{base_url}': {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfig(format!(
                "Invalid API base URL '{base_url}': expected http or https"
            )));
        }

        // Slow generations must not be cut off client-side
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::File(file) => {
                let part = reqwest::blocking::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name);
                builder.multipart(reqwest::blocking::multipart::Form::new().part("file", part))
            }
        };

        let response = builder
            .send()
            .map_err(|e| ApiError::Transport(format!("Request to {url} failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ApiError::Transport(format!("Failed to read response from {url}: {e}")))?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
