pub mod base;
pub mod gemini;
pub mod ollama;

use std::time::Duration;
use reqwest::Client;
use crate::error::CoachError;

pub use base::{LanguageModel, TextGenerator};

/// HTTP client shared by one backend for all of its requests.
/// No overall timeout unless one is configured.
pub(crate) fn build_http_client(timeout_secs: Option<u64>) -> Result<Client, CoachError> {
    let mut builder = Client::builder()
        .tcp_keepalive(Duration::from_secs(30))
        .pool_max_idle_per_host(10);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| CoachError::config(format!("Failed to create HTTP client: {}", e)).with_source("reqwest"))
}
