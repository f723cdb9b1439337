//! HTTP request handlers for the JSON surface.

mod health;
mod onboarding;

pub use health::health_handler;
pub use onboarding::app_action_handler;
