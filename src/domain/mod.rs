//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (shop, session, setup status)
//! - [`onboarding`] - Intents, the onboarding result taxonomy and the requester trait
//! - [`session_guard`] - Authentication capability consumed by the HTTP layer
//! - [`repositories`] - Data access trait definitions
//!
//! # Onboarding Flow
//!
//! 1. [`session_guard::SessionGuard`] turns a request into a [`entities::Session`]
//! 2. The action handler parses an [`onboarding::Intent`]
//! 3. [`onboarding::OnboardingLinkRequester`] asks the backend for a link
//! 4. The result is rendered as JSON or as the page in its new view state

pub mod entities;
pub mod onboarding;
pub mod repositories;
pub mod session_guard;
