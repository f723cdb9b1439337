//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`backend`] - HTTP client for the payment onboarding backend
//! - [`persistence`] - Setup status storage (PostgreSQL and in-memory)
//! - [`shopify`] - Platform session token verification

pub mod backend;
pub mod persistence;
pub mod shopify;
