use std::time::Instant;

use serde_json::Value;

use arca_domain::{ChatMessage, Source};
use arca_providers::ChatCompletion;

use crate::{ArcaService, ServiceError, ServiceResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatRequest {
	/// Falls back to the provider's configured `default_model`.
	#[serde(default)]
	pub model: Option<String>,
	pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatMetrics {
	pub prompt_tokens: Option<u64>,
	pub completion_tokens: Option<u64>,
	pub eval_duration_ns: Option<u64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatResponse {
	pub message: ChatMessage,
	pub model: Option<String>,
	pub response_time_secs: f64,
	pub tokens_per_second: Option<f64>,
	pub metrics: ChatMetrics,
}

impl ArcaService {
	/// Relays one chat completion to the requested inference server. Pure
	/// proxy: the transcript is only stored when the caller saves it.
	pub async fn chat(&self, provider: Source, req: ChatRequest) -> ServiceResult<ChatResponse> {
		if req.messages.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "messages must be non-empty.".to_string(),
			});
		}

		let (cfg, client) = self.inference_target(provider)?;
		let model = req.model.as_deref().or(cfg.default_model.as_deref()).ok_or_else(|| {
			ServiceError::InvalidRequest {
				message: format!("model is required; {provider} has no default_model configured."),
			}
		})?;
		let history: Vec<Value> = req
			.messages
			.iter()
			.map(|message| {
				serde_json::json!({ "role": message.role, "content": message.content })
			})
			.collect();
		let started = Instant::now();
		let completion = client.chat(cfg, model, &history).await?;
		let elapsed_secs = started.elapsed().as_secs_f64();

		tracing::debug!(%provider, model, elapsed_secs, "Chat completion relayed.");

		Ok(completion_response(completion, elapsed_secs))
	}
}

/// Tokens/second prefers the server's own generation clock (Ollama reports
/// one) and falls back to wall-clock time.
pub(crate) fn completion_response(completion: ChatCompletion, elapsed_secs: f64) -> ChatResponse {
	let tokens_per_second = match (completion.completion_tokens, completion.eval_duration_ns) {
		(Some(tokens), Some(ns)) if ns > 0 => Some(tokens as f64 / (ns as f64 / 1e9)),
		(Some(tokens), _) if elapsed_secs > 0.0 => Some(tokens as f64 / elapsed_secs),
		_ => None,
	};

	ChatResponse {
		message: ChatMessage {
			role: completion.role,
			content: completion.content,
			timestamp: None,
		},
		model: completion.model,
		response_time_secs: elapsed_secs,
		tokens_per_second,
		metrics: ChatMetrics {
			prompt_tokens: completion.prompt_tokens,
			completion_tokens: completion.completion_tokens,
			eval_duration_ns: completion.eval_duration_ns,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn completion(completion_tokens: Option<u64>, eval_duration_ns: Option<u64>) -> ChatCompletion {
		ChatCompletion {
			role: "assistant".to_string(),
			content: "ok".to_string(),
			model: Some("llama2".to_string()),
			prompt_tokens: Some(10),
			completion_tokens,
			eval_duration_ns,
		}
	}

	#[test]
	fn prefers_server_reported_generation_time() {
		let response = completion_response(completion(Some(30), Some(1_500_000_000)), 9.0);

		assert_eq!(response.tokens_per_second, Some(20.0));
		assert_eq!(response.response_time_secs, 9.0);
	}

	#[test]
	fn falls_back_to_wall_clock() {
		let response = completion_response(completion(Some(30), None), 3.0);

		assert_eq!(response.tokens_per_second, Some(10.0));
	}

	#[test]
	fn no_token_counts_means_no_rate() {
		let response = completion_response(completion(None, None), 3.0);

		assert_eq!(response.tokens_per_second, None);
		assert_eq!(response.metrics.prompt_tokens, Some(10));
	}
}
