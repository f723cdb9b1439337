//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShopDomain`] - The tenant (storefront) identifier
//! - [`Session`] - An authenticated admin session for one shop
//! - [`SetupStatus`] - Persisted onboarding completion for a shop
//!
//! Creation input uses a separate struct ([`NewSetupCompletion`]) carrying
//! its own validation rules.

pub mod session;
pub mod setup;
pub mod shop;

pub use session::Session;
pub use setup::{NewSetupCompletion, SetupStatus};
pub use shop::ShopDomain;
