use serde_json::Value;
use time::OffsetDateTime;

use arca_domain::{ChatMessage, Conversation, Source};

use crate::Error;

/// Persisted shape of one conversation document.
#[derive(Debug, sqlx::FromRow)]
pub struct ConversationRow {
	pub source: String,
	pub conversation_id: String,
	pub random_id: String,
	pub title: String,
	pub default_model_slug: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: Option<OffsetDateTime>,
	pub added_to_database: OffsetDateTime,
	pub messages: Value,
	pub message_count: i64,
}

impl TryFrom<ConversationRow> for Conversation {
	type Error = Error;

	fn try_from(row: ConversationRow) -> Result<Self, Self::Error> {
		let source = Source::parse(&row.source).ok_or_else(|| {
			Error::InvalidDocument(format!("Unknown source tag {:?}.", row.source))
		})?;
		let messages: Vec<ChatMessage> = serde_json::from_value(row.messages)
			.map_err(|err| Error::InvalidDocument(format!("Malformed messages array: {err}.")))?;

		Ok(Self {
			conversation_id: row.conversation_id,
			random_id: row.random_id,
			title: row.title,
			default_model_slug: row.default_model_slug,
			created_at: row.created_at,
			updated_at: row.updated_at,
			added_to_database: row.added_to_database,
			messages,
			message_count: row.message_count,
			source,
		})
	}
}
