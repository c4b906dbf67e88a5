//! Upsert and read access for conversation documents.

use sqlx::PgPool;

use arca_domain::{Conversation, Source};

use crate::{Error, Result, models::ConversationRow};

#[derive(Debug, Clone, Copy)]
pub struct UpsertOutcome {
	/// True when the document did not exist before this write.
	pub inserted: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpsertManyOutcome {
	pub inserted: u64,
	pub modified: u64,
}

/// Writes one document keyed by `(source, conversation_id)`.
///
/// Every field is overwritten on conflict except `added_to_database`, which
/// keeps the value stamped at first insert.
pub async fn upsert(pool: &PgPool, conversation: &Conversation) -> Result<UpsertOutcome> {
	let messages = serde_json::to_value(&conversation.messages)
		.map_err(|err| Error::InvalidDocument(format!("Unserializable messages: {err}.")))?;
	// xmax = 0 only for rows created by this statement.
	let inserted: bool = sqlx::query_scalar(
		"\
INSERT INTO conversations (
	source,
	conversation_id,
	random_id,
	title,
	default_model_slug,
	created_at,
	updated_at,
	added_to_database,
	messages,
	message_count
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
ON CONFLICT (source, conversation_id) DO UPDATE SET
	random_id = EXCLUDED.random_id,
	title = EXCLUDED.title,
	default_model_slug = EXCLUDED.default_model_slug,
	created_at = EXCLUDED.created_at,
	updated_at = EXCLUDED.updated_at,
	messages = EXCLUDED.messages,
	message_count = EXCLUDED.message_count
RETURNING (xmax = 0)",
	)
	.bind(conversation.source.as_str())
	.bind(&conversation.conversation_id)
	.bind(&conversation.random_id)
	.bind(&conversation.title)
	.bind(conversation.default_model_slug.as_deref())
	.bind(conversation.created_at)
	.bind(conversation.updated_at)
	.bind(conversation.added_to_database)
	.bind(&messages)
	.bind(conversation.message_count)
	.fetch_one(pool)
	.await?;

	Ok(UpsertOutcome { inserted })
}

/// Applies [`upsert`] per document. Best effort per item: an error aborts the
/// remainder but already-written documents stay written.
pub async fn upsert_many(
	pool: &PgPool,
	conversations: &[Conversation],
) -> Result<UpsertManyOutcome> {
	let mut outcome = UpsertManyOutcome::default();

	for conversation in conversations {
		if upsert(pool, conversation).await?.inserted {
			outcome.inserted += 1;
		} else {
			outcome.modified += 1;
		}
	}

	Ok(outcome)
}

pub async fn fetch_by_source(pool: &PgPool, source: Source) -> Result<Vec<Conversation>> {
	let rows: Vec<ConversationRow> = sqlx::query_as(
		"\
SELECT source, conversation_id, random_id, title, default_model_slug, created_at, updated_at,
	added_to_database, messages, message_count
FROM conversations
WHERE source = $1",
	)
	.bind(source.as_str())
	.fetch_all(pool)
	.await?;

	rows.into_iter().map(Conversation::try_from).collect()
}

pub async fn fetch_by_id(
	pool: &PgPool,
	source: Source,
	conversation_id: &str,
) -> Result<Option<Conversation>> {
	let row: Option<ConversationRow> = sqlx::query_as(
		"\
SELECT source, conversation_id, random_id, title, default_model_slug, created_at, updated_at,
	added_to_database, messages, message_count
FROM conversations
WHERE source = $1 AND conversation_id = $2",
	)
	.bind(source.as_str())
	.bind(conversation_id)
	.fetch_optional(pool)
	.await?;

	row.map(Conversation::try_from).transpose()
}

pub async fn count_by_source(pool: &PgPool, source: Source) -> Result<i64> {
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM conversations WHERE source = $1")
		.bind(source.as_str())
		.fetch_one(pool)
		.await?;

	Ok(count)
}
