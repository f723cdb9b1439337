//! HTTP middleware for request processing and protection.
//!
//! Provides session verification, rate limiting, and observability middleware.

pub mod rate_limit;
pub mod session_guard;
pub mod tracing;
