//! Client-side state containers.
//!
//! Stores hold the authoritative in-memory copy of server data for the
//! current session. They are constructed by the composition root and
//! injected into consumers; all mutation goes through typed action
//! methods on `&mut self`, never through shared ambient state.

mod listings;

pub use listings::{ListingsStore, PAGE_SIZE};
