//! Client-side filter and sort state for the listings collection.
//!
//! Purely local: none of this persists across sessions. The status filter
//! and sort fields are forwarded to the list endpoint as query parameters;
//! the free-text query is held for in-memory narrowing only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Status filter applied to the listings collection.
///
/// `All` means "no filter": it translates to omitting the status query
/// parameter entirely rather than sending a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only active listings.
    Active,
    /// Only sold listings.
    Sold,
    /// Only archived listings.
    Archived,
}

impl StatusFilter {
    /// Returns the query-parameter value, or `None` for [`Self::All`].
    #[must_use]
    pub const fn as_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Active => Some("active"),
            Self::Sold => Some("sold"),
            Self::Archived => Some("archived"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::UnknownStatusFilter(other.to_string())),
        }
    }
}

/// Sort key for the listings collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by posting date.
    #[default]
    Date,
    /// Sort by price.
    Price,
    /// Sort by view count.
    Views,
}

impl SortKey {
    /// Returns the key as its query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Price => "price",
            Self::Views => "views",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "date" => Ok(Self::Date),
            "price" => Ok(Self::Price),
            "views" => Ok(Self::Views),
            other => Err(DomainError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the direction as its query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Combined filter state held by the listings store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingFilter {
    /// Status filter.
    pub status: StatusFilter,
    /// Free-text search query, local narrowing only.
    pub query: String,
    /// Sort key forwarded to the list endpoint.
    pub sort_by: SortKey,
    /// Sort direction forwarded to the list endpoint.
    pub sort_order: SortOrder,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_translates_to_no_parameter() {
        assert_eq!(StatusFilter::All.as_param(), None);
        assert_eq!(StatusFilter::Sold.as_param(), Some("sold"));
    }

    #[test]
    fn test_filter_defaults() {
        let filter = ListingFilter::default();
        assert_eq!(filter.status, StatusFilter::All);
        assert_eq!(filter.sort_by, SortKey::Date);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert!(filter.query.is_empty());
    }

    #[test]
    fn test_sort_key_round_trip() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!(SortKey::Views.to_string(), "views");
        assert!("rating".parse::<SortKey>().is_err());
    }
}
