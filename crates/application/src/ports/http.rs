//! HTTP transport port

use std::future::Future;

use serde_json::Value;

use crate::error::ApiResult;

/// HTTP methods used by the consumed API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
}

impl Method {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One API call, relative to the transport's base address.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base address, e.g. `/listings/my`.
    pub path: String,
    /// JSON request body, if any.
    pub body: Option<Value>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Builds a GET request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Builds a POST request for `path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Builds a PATCH request for `path`.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Builds a DELETE request for `path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Returns the value of a query parameter, if present.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Port for executing API calls.
///
/// The adapter owns the base address, the timeout, per-request credential
/// injection, and the error-to-message normalization; callers see either
/// the decoded JSON body or an [`crate::ApiError`].
pub trait ApiTransport: Send + Sync {
    /// Executes one API call and returns the decoded JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error for connectivity failures, server-reported
    /// failures, and undecodable responses, already normalized.
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<Value>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_accumulates_query() {
        let request = ApiRequest::get("/listings/my")
            .with_query("page", "1")
            .with_query("limit", "20");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.query_value("page"), Some("1"));
        assert_eq!(request.query_value("limit"), Some("20"));
        assert_eq!(request.query_value("status"), None);
    }

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Patch.as_str(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
