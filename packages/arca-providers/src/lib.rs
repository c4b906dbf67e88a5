//! HTTP clients for the two locally hosted inference servers.
//!
//! Both servers are plain request/response JSON APIs. Calls are never
//! retried; an upstream failure bubbles up with the upstream's own text.

pub mod lmstudio;
pub mod ollama;

use std::time::Duration;

use color_eyre::Result;
use reqwest::Client;

/// The assistant's reply plus whatever usage accounting the server reported.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChatCompletion {
	pub role: String,
	pub content: String,
	pub model: Option<String>,
	pub prompt_tokens: Option<u64>,
	pub completion_tokens: Option<u64>,
	/// Generation time in nanoseconds. Only Ollama reports this.
	pub eval_duration_ns: Option<u64>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelInfo {
	pub id: String,
	pub size_bytes: Option<u64>,
	pub modified_at: Option<String>,
}

pub(crate) fn client(cfg: &arca_config::InferenceServer) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}
