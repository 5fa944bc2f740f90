//! Cache Module
//!
//! Provides a generic fixed-capacity in-memory cache with LRU eviction.

mod bounded;


// Re-export public types
pub use bounded::BoundedCache;
