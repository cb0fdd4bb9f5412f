//! Test doubles and fixtures for the transport and storage ports.
//!
//! Shipped as a public module so integration tests and downstream crates
//! exercise services and stores against canned responses instead of a
//! live server.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;

use trove_domain::{AuthSession, Listing, ListingStatus, Page, User};

use crate::error::{ApiError, ApiResult};
use crate::ports::{ApiRequest, ApiTransport, KeyValueStore, StorageError};

/// Transport double that replays queued responses and records requests.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<ApiResult<Value>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    /// Creates a double with an empty response queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    pub fn push_ok(&self, body: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(body));
    }

    /// Queues a failure.
    pub fn push_err(&self, error: ApiError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Returns every request sent so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ApiTransport for StubTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<Value>> + Send {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let result = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Unexpected("no canned response queued".to_string()))
            });
        std::future::ready(result)
    }
}

/// In-memory key-value store with optional failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent reads fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent writes and removals fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Sorted list of stored keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

fn injected_failure() -> StorageError {
    StorageError::Io(std::io::Error::other("injected storage failure"))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        Ok(self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// A deterministic listing record for assertions.
#[must_use]
pub fn listing_fixture(id: &str) -> Listing {
    let stamp = DateTime::from_timestamp(1_767_614_400, 0).unwrap_or_default();
    Listing {
        id: id.to_string(),
        title: format!("Listing {id}"),
        price: 40.0,
        image: format!("https://img.example/{id}.jpg"),
        images: Vec::new(),
        description: None,
        category: None,
        location: "Oakland, CA".to_string(),
        status: ListingStatus::Active,
        views: 0,
        saves: 0,
        messages: 0,
        posted_at: stamp,
        sold_price: None,
        sold_date: None,
        user_id: "u-1".to_string(),
        created_at: stamp,
        updated_at: stamp,
    }
}

/// A deterministic user record for assertions.
#[must_use]
pub fn user_fixture(id: &str) -> User {
    let stamp = DateTime::from_timestamp(1_762_084_800, 0).unwrap_or_default();
    User {
        id: id.to_string(),
        name: "Sam Seller".to_string(),
        email: format!("{id}@example.com"),
        phone: None,
        avatar_url: None,
        rating: 4.8,
        verified: true,
        created_at: stamp,
    }
}

/// A deterministic auth session for assertions.
#[must_use]
pub fn session_fixture(user_id: &str) -> AuthSession {
    AuthSession {
        user: user_fixture(user_id),
        token: format!("access-{user_id}"),
        refresh_token: format!("refresh-{user_id}"),
    }
}

/// Builds a paginated response body from listings.
#[must_use]
pub fn page_body(listings: &[Listing], total: u64, page: u32, limit: u32, has_more: bool) -> Value {
    serde_json::to_value(Page {
        data: listings.to_vec(),
        total,
        page,
        limit,
        has_more,
    })
    .unwrap_or(Value::Null)
}
