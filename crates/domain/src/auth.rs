//! Authentication payloads.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Response payload of a successful login or registration.
///
/// The token pair is persisted locally on receipt: the access token has a
/// server-defined expiry, the refresh token mints replacements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// The authenticated user's profile.
    pub user: User,
    /// Access token for bearer authentication.
    pub token: String,
    /// Refresh token for minting new access tokens.
    pub refresh_token: String,
}

/// Registration payload for a new account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
    /// Phone number, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
