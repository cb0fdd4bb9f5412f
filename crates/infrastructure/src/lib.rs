//! Trove Infrastructure - adapters for the application ports
//!
//! Concrete implementations of the transport and storage ports: a
//! reqwest-backed HTTP adapter and a JSON-file key-value store standing
//! in for the device's persistent storage.

pub mod http;
pub mod persistence;

pub use http::RestTransport;
pub use persistence::FileKeyValueStore;
