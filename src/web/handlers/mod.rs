//! HTML template rendering handlers for the embedded admin.

mod app_index;
mod session_token;

pub use app_index::{AppIndexTemplate, app_index_handler};
pub use session_token::{SessionTokenTemplate, session_token_handler};
