use time::OffsetDateTime;

use arca_domain::{ChatMessage, Conversation, Source};
use arca_storage::conversations;

use crate::{ArcaService, ServiceError, ServiceResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SaveRequest {
	#[serde(default)]
	pub conversation_id: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub model: Option<String>,
	pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SaveResponse {
	pub conversation_id: String,
	pub inserted: bool,
}

impl ArcaService {
	/// Saves a locally run chat transcript into the source's collection.
	///
	/// Re-saving with the same `conversation_id` overwrites the transcript but
	/// keeps `added_to_database` from the first save, so a continued chat stays
	/// one document.
	pub async fn save(&self, source: Source, req: SaveRequest) -> ServiceResult<SaveResponse> {
		if req.messages.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "messages must be non-empty.".to_string(),
			});
		}

		let now = OffsetDateTime::now_utc();
		let conversation_id = req
			.conversation_id
			.filter(|id| !id.trim().is_empty())
			.unwrap_or_else(|| generated_conversation_id(source, now));
		let conversation = Conversation {
			conversation_id: conversation_id.clone(),
			random_id: arca_domain::random_id(),
			title: req
				.title
				.filter(|title| !title.trim().is_empty())
				.unwrap_or_else(|| source.default_transcript_title().to_string()),
			default_model_slug: req.model,
			created_at: now,
			updated_at: Some(now),
			added_to_database: now,
			message_count: req.messages.len() as i64,
			messages: req.messages,
			source,
		};
		let outcome = conversations::upsert(&self.db.pool, &conversation).await?;

		tracing::info!(
			conversation_id = %conversation.conversation_id,
			inserted = outcome.inserted,
			%source,
			"Saved transcript."
		);

		Ok(SaveResponse { conversation_id, inserted: outcome.inserted })
	}
}

/// `<source>-<unix millis>-<random>`, used when the caller supplies no id.
fn generated_conversation_id(source: Source, now: OffsetDateTime) -> String {
	let millis = now.unix_timestamp_nanos() / 1_000_000;

	format!("{}-{}-{}", source.as_str(), millis, arca_domain::random_id())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_ids_carry_the_source_prefix() {
		let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");
		let id = generated_conversation_id(Source::Ollama, now);

		assert!(id.starts_with("ollama-1700000000000-"));
		assert_ne!(id, generated_conversation_id(Source::Ollama, now));
	}
}
