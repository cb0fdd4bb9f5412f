//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer (or by a double from [`crate::testing`]).

mod http;
mod storage;

pub use http::{ApiRequest, ApiTransport, Method};
pub use storage::{
    ACCESS_TOKEN_KEY, KeyValueStore, REFRESH_TOKEN_KEY, StorageError, USER_PROFILE_KEY,
};
