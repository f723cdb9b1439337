//! Embedded admin pages.
//!
//! Server-side rendered with Askama.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration
//! - [`view_state`] - State machine behind the onboarding panel

pub mod handlers;
pub mod routes;
pub mod view_state;
