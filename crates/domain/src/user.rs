//! User profile record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record for the signed-in seller.
///
/// Cached locally as a convenience; the server remains the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Avatar image URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Seller rating.
    #[serde(default)]
    pub rating: f64,
    /// Whether the account passed identity verification.
    #[serde(default)]
    pub verified: bool,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_deserializes_with_optional_fields_absent() {
        let json = serde_json::json!({
            "id": "u-1",
            "name": "Sam Seller",
            "email": "sam@example.com",
            "rating": 4.8,
            "verified": true,
            "createdAt": "2025-11-02T08:00:00Z"
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.phone, None);
        assert_eq!(user.avatar_url, None);
        assert!(user.verified);
    }
}
