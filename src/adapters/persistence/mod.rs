//! Persistence Adapters - Atomic JSON Document Storage
//!
//! Implements the store ports using one atomic-JSON file per
//! collection (rate cards, ports, quotes). No database dependency —
//! lightweight and crash-recoverable: every mutation is written to a
//! tmp file and renamed into place.

pub mod collection;
pub mod store_impl;

pub use collection::JsonCollection;
pub use store_impl::FileStore;
