//! Utility functions shared across layers.
//!
//! - [`shop_domain`] - Shop domain validation and normalization

pub mod shop_domain;
