//! LM Studio's OpenAI-compatible API: `POST /v1/chat/completions`,
//! `GET /v1/models`.

use color_eyre::{Result, eyre};
use serde_json::Value;

use crate::{ChatCompletion, ModelInfo};

pub async fn chat(
	cfg: &arca_config::InferenceServer,
	model: &str,
	messages: &[Value],
) -> Result<ChatCompletion> {
	let client = crate::client(cfg)?;
	let url = format!("{}/v1/chat/completions", cfg.api_base);
	let body = serde_json::json!({
		"model": model,
		"messages": messages,
		"temperature": 0.7,
		"max_tokens": -1,
		"stream": false,
	});
	let res = client.post(url).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_chat_response(json)
}

pub async fn list_models(cfg: &arca_config::InferenceServer) -> Result<Vec<ModelInfo>> {
	let client = crate::client(cfg)?;
	let url = format!("{}/v1/models", cfg.api_base);
	let res = client.get(url).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_models_response(json)
}

fn parse_chat_response(json: Value) -> Result<ChatCompletion> {
	let message = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|v| v.as_object())
		.ok_or_else(|| eyre::eyre!("LM Studio response has no choices[0].message."))?;
	let content = message
		.get("content")
		.and_then(|v| v.as_str())
		.ok_or_else(|| eyre::eyre!("LM Studio message is missing content."))?;
	let role = message.get("role").and_then(|v| v.as_str()).unwrap_or("assistant");
	let usage = json.get("usage");

	Ok(ChatCompletion {
		role: role.to_string(),
		content: content.to_string(),
		model: json.get("model").and_then(|v| v.as_str()).map(str::to_string),
		prompt_tokens: usage.and_then(|u| u.get("prompt_tokens")).and_then(|v| v.as_u64()),
		completion_tokens: usage.and_then(|u| u.get("completion_tokens")).and_then(|v| v.as_u64()),
		eval_duration_ns: None,
	})
}

fn parse_models_response(json: Value) -> Result<Vec<ModelInfo>> {
	let Some(data) = json.get("data").and_then(|v| v.as_array()) else {
		return Ok(Vec::new());
	};
	let models = data
		.iter()
		.filter_map(|model| model.get("id").and_then(|v| v.as_str()))
		.map(|id| ModelInfo { id: id.to_string(), size_bytes: None, modified_at: None })
		.collect();

	Ok(models)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_openai_style_completion() {
		let json = serde_json::json!({
			"model": "qwen2.5-7b-instruct",
			"choices": [
				{ "message": { "role": "assistant", "content": "Sure." }, "finish_reason": "stop" }
			],
			"usage": { "prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13 }
		});
		let completion = parse_chat_response(json).expect("parse failed");

		assert_eq!(completion.content, "Sure.");
		assert_eq!(completion.prompt_tokens, Some(9));
		assert_eq!(completion.completion_tokens, Some(4));
		assert_eq!(completion.eval_duration_ns, None);
	}

	#[test]
	fn empty_choices_is_an_error() {
		let json = serde_json::json!({ "choices": [] });

		assert!(parse_chat_response(json).is_err());
	}

	#[test]
	fn parses_model_ids() {
		let json = serde_json::json!({
			"data": [ { "id": "qwen2.5-7b-instruct" }, { "object": "model" } ]
		});
		let models = parse_models_response(json).expect("parse failed");

		assert_eq!(models.len(), 1);
		assert_eq!(models[0].id, "qwen2.5-7b-instruct");
	}
}
