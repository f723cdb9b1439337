//! JSON HTTP surface.
//!
//! # Structure
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - Onboarding action and health check
//! - [`middleware`] - Session guard, rate limiting, request tracing
//!
//! The onboarding action answers with JSON by default and falls back to the
//! rendered page for plain form posts.

pub mod dto;
pub mod handlers;
pub mod middleware;
