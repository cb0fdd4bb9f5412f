//! Domain services: stateless request builders over the transport port.
//!
//! Each service method issues exactly one HTTP call, unwraps the standard
//! response envelope, and returns a typed result or a normalized
//! [`ApiError`]. Services hold no state beyond their port handles.

mod auth;
mod listings;

pub use auth::AuthService;
pub use listings::ListingsService;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Decodes a JSON body into `T`.
fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Unexpected(format!("response decode: {e}")))
}

/// Unwraps the `{ success, data, message }` envelope around a resource.
///
/// A `success: false` body on a 2xx response is a server-reported failure
/// carrying the envelope's message.
fn unwrap_envelope<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    let envelope: trove_domain::Envelope<T> = decode(value)?;
    if !envelope.success {
        return Err(ApiError::server(200, envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Unexpected("envelope carried no data".to_string()))
}

/// Unwraps an envelope whose payload does not matter (acknowledgements).
fn unwrap_ack(value: Value) -> ApiResult<()> {
    let envelope: trove_domain::Envelope<Value> = decode(value)?;
    if envelope.success {
        Ok(())
    } else {
        Err(ApiError::server(200, envelope.message))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_returns_data() {
        let value = json!({"success": true, "data": {"answer": 42}});
        let data: Value = unwrap_envelope(value).unwrap();
        assert_eq!(data, json!({"answer": 42}));
    }

    #[test]
    fn test_unwrap_envelope_failure_uses_message() {
        let value = json!({"success": false, "message": "Not found"});
        let err = unwrap_envelope::<Value>(value).unwrap_err();
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_unwrap_ack_tolerates_missing_data() {
        let value = json!({"success": true});
        assert!(unwrap_ack(value).is_ok());
    }

    #[test]
    fn test_decode_failure_is_unexpected() {
        let err = decode::<u32>(json!("not a number")).unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
    }
}
