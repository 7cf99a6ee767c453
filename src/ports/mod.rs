//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `Geocoder`: forward geocoding of free-text place names
//! - `RateCardStore` / `PortStore` / `QuoteStore`: persistence

pub mod geocoder;
pub mod stores;
