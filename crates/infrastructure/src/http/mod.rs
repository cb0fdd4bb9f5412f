//! HTTP transport adapter using reqwest.
//!
//! Implements the `ApiTransport` port: one shared client with a base
//! address, a fixed timeout, and JSON default headers. Before every
//! request the access token is read fresh from storage and attached as a
//! bearer header; a storage read failure downgrades the request to
//! unauthenticated instead of failing it. A 401 response deletes the
//! stored credential pair before the failure propagates — no automatic
//! retry or token refresh happens at this layer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::warn;
use url::Url;

use trove_application::error::{ApiError, ApiResult};
use trove_application::ports::{
    ACCESS_TOKEN_KEY, ApiRequest, ApiTransport, KeyValueStore, Method, REFRESH_TOKEN_KEY,
};

/// Fixed request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed implementation of the `ApiTransport` port.
pub struct RestTransport<S> {
    client: Client,
    /// Base address with any trailing slash trimmed.
    base: String,
    storage: Arc<S>,
}

impl<S: KeyValueStore> RestTransport<S> {
    /// Creates a transport with the default client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(base_url: &Url, storage: Arc<S>) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Unexpected(format!("client build: {e}")))?;
        Ok(Self::with_client(client, base_url, storage))
    }

    /// Creates a transport around a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &Url, storage: Arc<S>) -> Self {
        Self {
            client,
            base: base_url.as_str().trim_end_matches('/').to_string(),
            storage,
        }
    }

    fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// Maps a reqwest failure onto the normalized taxonomy: anything
    /// where no response was received is a connectivity failure.
    fn map_send_error(error: &reqwest::Error) -> ApiError {
        if error.is_timeout() || error.is_connect() {
            ApiError::Network
        } else {
            ApiError::Unexpected(error.to_string())
        }
    }

    /// Pulls the server's message out of an error body, tolerating both
    /// `{ message }` and `{ error: { message } }` shapes.
    fn error_message(body: &[u8]) -> Option<String> {
        let value: Value = serde_json::from_slice(body).ok()?;
        value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
    }

    async fn bearer_token(&self) -> Option<String> {
        match self.storage.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "credential read failed; sending unauthenticated");
                None
            }
        }
    }

    async fn wipe_credentials(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(err) = self.storage.remove(key).await {
                warn!(key, error = %err, "credential wipe failed");
            }
        }
    }
}

impl<S: KeyValueStore> ApiTransport for RestTransport<S> {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<Value>> + Send {
        async move {
            let url = format!("{}{}", self.base, request.path);
            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url)
                .query(&request.query);

            if let Some(token) = self.bearer_token().await {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_send_error(&e))?;
            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                self.wipe_credentials().await;
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_send_error(&e))?;
            if !status.is_success() {
                return Err(ApiError::server(
                    status.as_u16(),
                    Self::error_message(&bytes),
                ));
            }

            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Unexpected(format!("response decode: {e}")))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use trove_application::testing::MemoryStore;

    fn transport() -> RestTransport<MemoryStore> {
        let base = Url::parse("https://api.trove.example/").unwrap();
        RestTransport::new(&base, Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_base_address_trailing_slash_is_trimmed() {
        let transport = transport();
        assert_eq!(transport.base, "https://api.trove.example");
    }

    #[test]
    fn test_error_message_from_flat_body() {
        let body = br#"{"success": false, "message": "Not found"}"#;
        assert_eq!(
            RestTransport::<MemoryStore>::error_message(body).as_deref(),
            Some("Not found")
        );
    }

    #[test]
    fn test_error_message_from_nested_body() {
        let body = br#"{"error": {"message": "Listing locked"}}"#;
        assert_eq!(
            RestTransport::<MemoryStore>::error_message(body).as_deref(),
            Some("Listing locked")
        );
    }

    #[test]
    fn test_error_message_absent_for_garbage() {
        assert_eq!(RestTransport::<MemoryStore>::error_message(b"<html>"), None);
        assert_eq!(RestTransport::<MemoryStore>::error_message(b"{}"), None);
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(
            RestTransport::<MemoryStore>::to_reqwest_method(Method::Patch),
            reqwest::Method::PATCH
        );
        assert_eq!(
            RestTransport::<MemoryStore>::to_reqwest_method(Method::Delete),
            reqwest::Method::DELETE
        );
    }
}
