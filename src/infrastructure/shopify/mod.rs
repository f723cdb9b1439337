//! Platform (Shopify) integration adapters.

pub mod session_token_guard;

pub use session_token_guard::{BOUNCE_PATH, SessionTokenGuard};
