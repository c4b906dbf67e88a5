//! Ollama's native chat API: `POST /api/chat`, `GET /api/tags`.

use color_eyre::{Result, eyre};
use serde_json::Value;

use crate::{ChatCompletion, ModelInfo};

pub async fn chat(
	cfg: &arca_config::InferenceServer,
	model: &str,
	messages: &[Value],
) -> Result<ChatCompletion> {
	let client = crate::client(cfg)?;
	let url = format!("{}/api/chat", cfg.api_base);
	let body = serde_json::json!({
		"model": model,
		"messages": messages,
		"stream": false,
	});
	let res = client.post(url).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_chat_response(json)
}

pub async fn list_models(cfg: &arca_config::InferenceServer) -> Result<Vec<ModelInfo>> {
	let client = crate::client(cfg)?;
	let url = format!("{}/api/tags", cfg.api_base);
	let res = client.get(url).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_models_response(json)
}

fn parse_chat_response(json: Value) -> Result<ChatCompletion> {
	let message = json
		.get("message")
		.and_then(|v| v.as_object())
		.ok_or_else(|| eyre::eyre!("Ollama response is missing the message object."))?;
	let content = message
		.get("content")
		.and_then(|v| v.as_str())
		.ok_or_else(|| eyre::eyre!("Ollama message is missing content."))?;
	let role = message.get("role").and_then(|v| v.as_str()).unwrap_or("assistant");

	Ok(ChatCompletion {
		role: role.to_string(),
		content: content.to_string(),
		model: json.get("model").and_then(|v| v.as_str()).map(str::to_string),
		prompt_tokens: json.get("prompt_eval_count").and_then(|v| v.as_u64()),
		completion_tokens: json.get("eval_count").and_then(|v| v.as_u64()),
		eval_duration_ns: json.get("eval_duration").and_then(|v| v.as_u64()),
	})
}

fn parse_models_response(json: Value) -> Result<Vec<ModelInfo>> {
	let Some(models) = json.get("models").and_then(|v| v.as_array()) else {
		return Ok(Vec::new());
	};
	let mut infos = Vec::with_capacity(models.len());

	for model in models {
		let Some(name) = model.get("name").and_then(|v| v.as_str()) else {
			continue;
		};

		infos.push(ModelInfo {
			id: name.to_string(),
			size_bytes: model.get("size").and_then(|v| v.as_u64()),
			modified_at: model.get("modified_at").and_then(|v| v.as_str()).map(str::to_string),
		});
	}

	Ok(infos)
}
