//! In-memory listings store.
//!
//! Holds the seller's listings collection for the current session and
//! mediates between UI actions and the listings service. A single shared
//! `is_loading`/`error` pair guards every mutating action: the flag means
//! "at least one action is in flight", not per-action status. Store
//! actions take `&mut self`, so two actions cannot overlap on the same
//! store value; re-entrant double-submission is a compile error rather
//! than a runtime hazard.
//!
//! Error policy: every action catches its service error and records the
//! message in `error`. All actions except [`ListingsStore::fetch_listings`]
//! also propagate the error so the caller can show targeted feedback;
//! fetch failures have no caller expecting a result and are absorbed.

use std::sync::Arc;

use trove_domain::{
    Listing, ListingFilter, ListingPatch, ListingStatus, NewListing, PromotionTier, SoldLocation,
};

use crate::error::{ApiError, ApiResult};
use crate::ports::ApiTransport;
use crate::services::ListingsService;

/// Page size requested from the list endpoint.
pub const PAGE_SIZE: u32 = 20;

/// State container for the seller's listings collection.
#[derive(Debug)]
pub struct ListingsStore<T> {
    service: ListingsService<T>,
    listings: Vec<Listing>,
    is_loading: bool,
    error: Option<String>,
    /// Next page to request; 1 until the first fetch succeeds.
    current_page: u32,
    has_more: bool,
    total: u64,
    filter: ListingFilter,
}

impl<T: ApiTransport> ListingsStore<T> {
    /// Creates an empty store over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            service: ListingsService::new(transport),
            listings: Vec::new(),
            is_loading: false,
            error: None,
            current_page: 1,
            has_more: false,
            total: 0,
            filter: ListingFilter::default(),
        }
    }

    /// The cached collection, newest first.
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Whether at least one action is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the most recent failed action, until cleared.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Next page number a continuation fetch will request.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Whether the server reported more pages after the last fetched one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total records across all pages, as last reported by the server.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The active filter state.
    #[must_use]
    pub const fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    /// Fetches listings from the server.
    ///
    /// With `refresh` true the store requests page 1 and replaces the
    /// collection; otherwise it requests the next page and appends.
    /// `has_more` and `total` are taken verbatim from the response.
    /// Failures are recorded in [`Self::error`] and not propagated.
    pub async fn fetch_listings(&mut self, refresh: bool) {
        self.begin_action();
        let page = if refresh { 1 } else { self.current_page };
        match self.service.list_mine(page, PAGE_SIZE, &self.filter).await {
            Ok(response) => {
                if refresh {
                    self.listings = response.data;
                    self.current_page = 2;
                } else {
                    self.listings.extend(response.data);
                    self.current_page += 1;
                }
                self.has_more = response.has_more;
                self.total = response.total;
                self.is_loading = false;
            }
            Err(err) => {
                self.fail_action(err);
            }
        }
    }

    /// Creates a listing and prepends the server's record.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn create_listing(&mut self, listing: &NewListing) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.create(listing).await {
            Ok(created) => {
                self.listings.insert(0, created.clone());
                self.is_loading = false;
                Ok(created)
            }
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Patches a listing and folds the server's record into the
    /// collection.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn update_listing(&mut self, id: &str, patch: &ListingPatch) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.update(id, patch).await {
            Ok(updated) => Ok(self.absorb(updated)),
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Marks a listing sold and folds the server's record into the
    /// collection.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn mark_as_sold(
        &mut self,
        id: &str,
        sold_price: f64,
        location: SoldLocation,
    ) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.mark_sold(id, sold_price, location).await {
            Ok(sold) => Ok(self.absorb(sold)),
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Archives a listing and folds the server's record into the
    /// collection.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn archive_listing(&mut self, id: &str) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.archive(id).await {
            Ok(archived) => Ok(self.absorb(archived)),
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Restores an archived listing and folds the server's record into
    /// the collection.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn restore_listing(&mut self, id: &str) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.restore(id).await {
            Ok(restored) => Ok(self.absorb(restored)),
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Duplicates a listing and prepends the fresh record.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn duplicate_listing(&mut self, id: &str) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.duplicate(id).await {
            Ok(copy) => {
                self.listings.insert(0, copy.clone());
                self.is_loading = false;
                Ok(copy)
            }
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Promotes a listing and folds the server's record into the
    /// collection.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn promote_listing(
        &mut self,
        id: &str,
        tier: PromotionTier,
        duration_days: u32,
    ) -> ApiResult<Listing> {
        self.begin_action();
        match self.service.promote(id, tier, duration_days).await {
            Ok(promoted) => Ok(self.absorb(promoted)),
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Deletes a listing, dropping it from the collection only after the
    /// remote call succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn delete_listing(&mut self, id: &str) -> ApiResult<()> {
        self.begin_action();
        match self.service.delete(id).await {
            Ok(()) => {
                self.listings.retain(|l| l.id != id);
                self.is_loading = false;
                Ok(())
            }
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Deletes several listings in one request, dropping them from the
    /// collection only after the remote call succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn bulk_delete(&mut self, ids: &[String]) -> ApiResult<()> {
        self.begin_action();
        match self.service.bulk_delete(ids).await {
            Ok(()) => {
                self.listings.retain(|l| !ids.contains(&l.id));
                self.is_loading = false;
                Ok(())
            }
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Archives several listings in one request.
    ///
    /// The bulk endpoint returns no per-item bodies, so on success the
    /// store patches `status` locally on the matching records instead of
    /// re-fetching.
    ///
    /// # Errors
    ///
    /// Propagates the service error after recording it.
    pub async fn bulk_archive(&mut self, ids: &[String]) -> ApiResult<()> {
        self.begin_action();
        match self.service.bulk_archive(ids).await {
            Ok(()) => {
                for listing in self.listings.iter_mut().filter(|l| ids.contains(&l.id)) {
                    listing.status = ListingStatus::Archived;
                }
                self.is_loading = false;
                Ok(())
            }
            Err(err) => Err(self.fail_action(err)),
        }
    }

    /// Replaces the filter state. Synchronous; the caller decides when to
    /// re-fetch.
    pub fn set_filter(&mut self, filter: ListingFilter) {
        self.filter = filter;
    }

    /// Clears the recorded error message. Synchronous.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn begin_action(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn fail_action(&mut self, err: ApiError) -> ApiError {
        self.error = Some(err.to_string());
        self.is_loading = false;
        err
    }

    /// Replaces the matching-id record with the server's canonical copy;
    /// records the server returns for unknown ids are ignored.
    fn absorb(&mut self, canonical: Listing) -> Listing {
        if let Some(slot) = self.listings.iter_mut().find(|l| l.id == canonical.id) {
            *slot = canonical.clone();
        }
        self.is_loading = false;
        canonical
    }
}
