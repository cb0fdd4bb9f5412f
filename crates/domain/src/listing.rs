//! Listing records and their wire enumerations.
//!
//! A [`Listing`] is a sale item as returned by the server. The server is the
//! source of truth for every field, including `status`: the client never
//! computes a status transition itself, it only displays what the server
//! returned (the one exception is the local patch after a bulk archive, see
//! the application crate's store).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Lifecycle status of a listing.
///
/// Transitions are one-directional except restore: active -> sold,
/// active -> archived, archived -> active. Duplication mints a fresh
/// record whose status the server decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Publicly visible and for sale.
    #[default]
    Active,
    /// Sold, with sale details recorded.
    Sold,
    /// Hidden from buyers, restorable.
    Archived,
    /// Not yet published.
    Draft,
}

impl ListingStatus {
    /// Returns the status as its wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Archived => "archived",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "archived" => Ok(Self::Archived),
            "draft" => Ok(Self::Draft),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Where a sale was completed when marking a listing sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoldLocation {
    /// Sold through the marketplace itself.
    Offerup,
    /// Sold outside the marketplace.
    Elsewhere,
}

impl SoldLocation {
    /// Returns the location as its wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offerup => "offerup",
            Self::Elsewhere => "elsewhere",
        }
    }
}

impl FromStr for SoldLocation {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "offerup" => Ok(Self::Offerup),
            "elsewhere" => Ok(Self::Elsewhere),
            other => Err(DomainError::UnknownSoldLocation(other.to_string())),
        }
    }
}

/// Paid promotion tier for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionTier {
    /// Entry tier.
    Basic,
    /// Mid tier.
    Premium,
    /// Top tier.
    Ultimate,
}

impl PromotionTier {
    /// Returns the tier as its wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Ultimate => "ultimate",
        }
    }
}

impl FromStr for PromotionTier {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "ultimate" => Ok(Self::Ultimate),
            other => Err(DomainError::UnknownPromotionTier(other.to_string())),
        }
    }
}

/// A sale item record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Server-assigned identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Asking price in the account's currency unit.
    pub price: f64,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Seller-entered location string.
    pub location: String,
    /// Lifecycle status.
    pub status: ListingStatus,
    /// Total view count.
    #[serde(default)]
    pub views: u64,
    /// Total save count.
    #[serde(default)]
    pub saves: u64,
    /// Total message count.
    #[serde(default)]
    pub messages: u64,
    /// When the listing was posted.
    pub posted_at: DateTime<Utc>,
    /// Final sale price, present once sold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<f64>,
    /// Sale date, present once sold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<DateTime<Utc>>,
    /// Owning user id.
    pub user_id: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    /// Display title.
    pub title: String,
    /// Asking price.
    pub price: f64,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Seller-entered location string.
    pub location: String,
}

/// Partial-field patch for updating a listing.
///
/// Only fields that are `Some` are serialized and applied by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New price, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New primary image URL, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Replacement gallery, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// New description, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New location, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ListingPatch {
    /// Returns true if the patch carries no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.images.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.location.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ListingStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::from_str::<ListingStatus>("\"archived\"").unwrap(),
            ListingStatus::Archived
        );
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("sold".parse::<ListingStatus>().unwrap(), ListingStatus::Sold);
        assert!("deleted".parse::<ListingStatus>().is_err());
    }

    #[test]
    fn test_sold_location_from_str() {
        assert_eq!(
            "offerup".parse::<SoldLocation>().unwrap(),
            SoldLocation::Offerup
        );
        assert!("ebay".parse::<SoldLocation>().is_err());
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = ListingPatch {
            price: Some(25.0),
            ..ListingPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"price": 25.0}));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ListingPatch::default().is_empty());
        let patch = ListingPatch {
            title: Some("Lamp".to_string()),
            ..ListingPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_listing_round_trip_uses_camel_case() {
        let json = serde_json::json!({
            "id": "l-1",
            "title": "Bike",
            "price": 120.0,
            "image": "https://img.example/bike.jpg",
            "images": [],
            "location": "Oakland, CA",
            "status": "active",
            "views": 10,
            "saves": 2,
            "messages": 1,
            "postedAt": "2026-01-05T10:00:00Z",
            "userId": "u-1",
            "createdAt": "2026-01-05T10:00:00Z",
            "updatedAt": "2026-01-06T09:30:00Z"
        });
        let listing: Listing = serde_json::from_value(json).unwrap();
        assert_eq!(listing.user_id, "u-1");
        assert_eq!(listing.status, ListingStatus::Active);
        assert!(listing.sold_price.is_none());
    }
}
