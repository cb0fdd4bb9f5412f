//! Trove Domain - Core business types
//!
//! This crate defines the data model for the Trove marketplace client.
//! All types here are pure Rust with no I/O dependencies; everything that
//! crosses the wire serializes with serde using the API's camelCase names.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod insights;
pub mod listing;
pub mod user;

pub use auth::{AuthSession, NewUser};
pub use envelope::{Envelope, Page};
pub use error::{DomainError, DomainResult};
pub use filter::{ListingFilter, SortKey, SortOrder, StatusFilter};
pub use insights::{InsightPoint, ListingInsights};
pub use listing::{Listing, ListingPatch, ListingStatus, NewListing, PromotionTier, SoldLocation};
pub use user::User;
