//! Giron client: HTTP transport for the discussion service.

mod config;
mod http;

pub use config::{ClientConfig, DEFAULT_API_URL};
pub use http::DiscussionApiClient;
