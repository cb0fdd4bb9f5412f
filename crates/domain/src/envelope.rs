//! Response body shapes of the consumed API.
//!
//! These mirror the server's envelope contract: single resources arrive as
//! `{ success, data, message? }`, paginated lists as a flat page object.
//! The envelope is the request/response body shape of an existing API, not
//! a wire protocol of this crate's own design.

use serde::{Deserialize, Serialize};

/// Standard envelope around a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the server considers the call successful.
    pub success: bool,
    /// The resource payload, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message, usually present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Paginated list response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Total records across all pages.
    pub total: u64,
    /// One-based page number of this page.
    pub page: u32,
    /// Page size used by the server.
    pub limit: u32,
    /// Whether another page exists after this one.
    pub has_more: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_envelope_failure_has_no_data() {
        let env: Envelope<String> =
            serde_json::from_str(r#"{"success": false, "message": "Not found"}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.data, None);
        assert_eq!(env.message.as_deref(), Some("Not found"));
    }

    #[test]
    fn test_page_uses_camel_case_has_more() {
        let page: Page<u32> = serde_json::from_value(serde_json::json!({
            "data": [1, 2],
            "total": 5,
            "page": 1,
            "limit": 20,
            "hasMore": true
        }))
        .unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert!(page.has_more);
    }
}
