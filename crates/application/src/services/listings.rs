//! Listings service: one method per endpoint.
//!
//! Thin request/response mappings with no operation-specific recovery;
//! every failure surfaces as a normalized [`ApiError`](crate::ApiError).
//! The bulk endpoints report no per-item outcome, so a bulk call is
//! all-or-nothing from this client's perspective.

use std::sync::Arc;

use serde_json::json;

use trove_domain::{
    Listing, ListingFilter, ListingInsights, ListingPatch, NewListing, Page, PromotionTier,
    SoldLocation,
};

use super::{decode, unwrap_ack, unwrap_envelope};
use crate::error::{ApiError, ApiResult};
use crate::ports::{ApiRequest, ApiTransport};

/// Stateless wrapper over the listings endpoints.
#[derive(Debug)]
pub struct ListingsService<T> {
    transport: Arc<T>,
}

impl<T> Clone for ListingsService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: ApiTransport> ListingsService<T> {
    /// Creates a new listings service over the given transport.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Fetches one page of the seller's own listings.
    ///
    /// The status filter is forwarded only when it selects something;
    /// "all" means the parameter is omitted entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_mine(
        &self,
        page: u32,
        limit: u32,
        filter: &ListingFilter,
    ) -> ApiResult<Page<Listing>> {
        let mut request = ApiRequest::get("/listings/my")
            .with_query("page", page.to_string())
            .with_query("limit", limit.to_string())
            .with_query("sortBy", filter.sort_by.as_str())
            .with_query("sortOrder", filter.sort_order.as_str());
        if let Some(status) = filter.status.as_param() {
            request = request.with_query("status", status);
        }
        decode(self.transport.send(request).await?)
    }

    /// Fetches a single listing by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, id: &str) -> ApiResult<Listing> {
        unwrap_envelope(self.transport.send(ApiRequest::get(format!("/listings/{id}"))).await?)
    }

    /// Creates a new listing and returns the server's record.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, listing: &NewListing) -> ApiResult<Listing> {
        let body = serde_json::to_value(listing)
            .map_err(|e| ApiError::Unexpected(format!("request encode: {e}")))?;
        unwrap_envelope(
            self.transport
                .send(ApiRequest::post("/listings").with_body(body))
                .await?,
        )
    }

    /// Applies a partial-field patch and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn update(&self, id: &str, patch: &ListingPatch) -> ApiResult<Listing> {
        let body = serde_json::to_value(patch)
            .map_err(|e| ApiError::Unexpected(format!("request encode: {e}")))?;
        unwrap_envelope(
            self.transport
                .send(ApiRequest::patch(format!("/listings/{id}")).with_body(body))
                .await?,
        )
    }

    /// Deletes a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        unwrap_ack(
            self.transport
                .send(ApiRequest::delete(format!("/listings/{id}")))
                .await?,
        )
    }

    /// Marks a listing sold with its sale price and where it sold.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn mark_sold(
        &self,
        id: &str,
        sold_price: f64,
        location: SoldLocation,
    ) -> ApiResult<Listing> {
        let body = json!({"soldPrice": sold_price, "soldLocation": location});
        unwrap_envelope(
            self.transport
                .send(ApiRequest::post(format!("/listings/{id}/sold")).with_body(body))
                .await?,
        )
    }

    /// Archives a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn archive(&self, id: &str) -> ApiResult<Listing> {
        unwrap_envelope(
            self.transport
                .send(ApiRequest::post(format!("/listings/{id}/archive")))
                .await?,
        )
    }

    /// Restores an archived listing to active.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn restore(&self, id: &str) -> ApiResult<Listing> {
        unwrap_envelope(
            self.transport
                .send(ApiRequest::post(format!("/listings/{id}/restore")))
                .await?,
        )
    }

    /// Duplicates a listing into a fresh record; the server copies the
    /// content fields and decides the new record's status and counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn duplicate(&self, id: &str) -> ApiResult<Listing> {
        unwrap_envelope(
            self.transport
                .send(ApiRequest::post(format!("/listings/{id}/duplicate")))
                .await?,
        )
    }

    /// Promotes a listing at the given tier for a number of days.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn promote(
        &self,
        id: &str,
        tier: PromotionTier,
        duration_days: u32,
    ) -> ApiResult<Listing> {
        let body = json!({"tier": tier, "durationDays": duration_days});
        unwrap_envelope(
            self.transport
                .send(ApiRequest::post(format!("/listings/{id}/promote")).with_body(body))
                .await?,
        )
    }

    /// Fetches engagement insights for a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn insights(&self, id: &str) -> ApiResult<ListingInsights> {
        unwrap_envelope(
            self.transport
                .send(ApiRequest::get(format!("/listings/{id}/insights")))
                .await?,
        )
    }

    /// Deletes several listings in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn bulk_delete(&self, ids: &[String]) -> ApiResult<()> {
        unwrap_ack(
            self.transport
                .send(ApiRequest::post("/listings/bulk/delete").with_body(json!({"ids": ids})))
                .await?,
        )
    }

    /// Archives several listings in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn bulk_archive(&self, ids: &[String]) -> ApiResult<()> {
        unwrap_ack(
            self.transport
                .send(ApiRequest::post("/listings/bulk/archive").with_body(json!({"ids": ids})))
                .await?,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::Method;
    use crate::testing::{StubTransport, listing_fixture, page_body};
    use pretty_assertions::assert_eq;

    fn service(transport: &Arc<StubTransport>) -> ListingsService<StubTransport> {
        ListingsService::new(Arc::clone(transport))
    }

    #[tokio::test]
    async fn test_list_mine_omits_status_for_all() {
        let transport = Arc::new(StubTransport::new());
        transport.push_ok(page_body(&[listing_fixture("a")], 1, 1, 20, false));

        let page = service(&transport)
            .list_mine(1, 20, &ListingFilter::default())
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);

        let sent = transport.requests().pop().unwrap();
        assert_eq!(sent.path, "/listings/my");
        assert_eq!(sent.query_value("status"), None);
        assert_eq!(sent.query_value("sortBy"), Some("date"));
        assert_eq!(sent.query_value("sortOrder"), Some("desc"));
    }

    #[tokio::test]
    async fn test_list_mine_forwards_selected_status() {
        let transport = Arc::new(StubTransport::new());
        transport.push_ok(page_body(&[], 0, 1, 20, false));

        let filter = ListingFilter {
            status: trove_domain::StatusFilter::Sold,
            ..ListingFilter::default()
        };
        service(&transport).list_mine(1, 20, &filter).await.unwrap();

        let sent = transport.requests().pop().unwrap();
        assert_eq!(sent.query_value("status"), Some("sold"));
    }

    #[tokio::test]
    async fn test_mark_sold_sends_price_and_location() {
        let transport = Arc::new(StubTransport::new());
        let sold = listing_fixture("a");
        transport.push_ok(json!({"success": true, "data": serde_json::to_value(&sold).unwrap()}));

        service(&transport)
            .mark_sold("a", 80.0, SoldLocation::Offerup)
            .await
            .unwrap();

        let sent = transport.requests().pop().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/listings/a/sold");
        assert_eq!(
            sent.body.unwrap(),
            json!({"soldPrice": 80.0, "soldLocation": "offerup"})
        );
    }

    #[tokio::test]
    async fn test_bulk_delete_sends_ids_in_one_request() {
        let transport = Arc::new(StubTransport::new());
        transport.push_ok(json!({"success": true}));

        let ids = vec!["x".to_string(), "y".to_string()];
        service(&transport).bulk_delete(&ids).await.unwrap();

        assert_eq!(transport.request_count(), 1);
        let sent = transport.requests().pop().unwrap();
        assert_eq!(sent.path, "/listings/bulk/delete");
        assert_eq!(sent.body.unwrap(), json!({"ids": ["x", "y"]}));
    }

    #[tokio::test]
    async fn test_server_failure_message_propagates() {
        let transport = Arc::new(StubTransport::new());
        transport.push_err(ApiError::server(404, Some("Not found".to_string())));

        let err = service(&transport).get("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found");
    }

    #[tokio::test]
    async fn test_promote_body_shape() {
        let transport = Arc::new(StubTransport::new());
        let listing = listing_fixture("a");
        transport
            .push_ok(json!({"success": true, "data": serde_json::to_value(&listing).unwrap()}));

        service(&transport)
            .promote("a", PromotionTier::Premium, 7)
            .await
            .unwrap();

        let sent = transport.requests().pop().unwrap();
        assert_eq!(sent.body.unwrap(), json!({"tier": "premium", "durationDays": 7}));
    }
}
