//! Flattens one tree-shaped conversation export into a storable document.

use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	ChatMessage, Conversation, Source,
	export::{MappingNode, RawConversation},
};

/// Title stored when an export carries none.
pub const DEFAULT_TITLE: &str = "Untitled Conversation";

/// Roles that survive normalization. Everything else (`system`, `tool`, ...)
/// is dropped from the flat transcript.
const KEPT_ROLES: [&str; 2] = ["user", "assistant"];

/// Converts a raw export record into a flat [`Conversation`] tagged with
/// `source`.
///
/// Every mapping node is visited in node-id order (the map's own iteration
/// order), not by walking `parent`/`children` edges. The resulting message
/// order is therefore deterministic but does not reconstruct conversational
/// order; callers that need true ordering must not rely on it.
///
/// Malformed pieces are skipped, never reported: a node with no message, a
/// message with an unexpected role, or content that joins to whitespace
/// contributes nothing. A missing `mapping` yields an empty transcript.
pub fn normalize(raw: &RawConversation, source: Source) -> Conversation {
	let messages: Vec<ChatMessage> = raw
		.mapping
		.iter()
		.flat_map(|mapping| mapping.values())
		.filter_map(flatten_node)
		.collect();
	let now = OffsetDateTime::now_utc();

	Conversation {
		conversation_id: raw.id.clone(),
		random_id: random_id(),
		title: raw
			.title
			.as_deref()
			.filter(|title| !title.trim().is_empty())
			.unwrap_or(DEFAULT_TITLE)
			.to_string(),
		default_model_slug: raw.default_model_slug.clone(),
		created_at: raw.create_time.and_then(from_unix_seconds).unwrap_or(now),
		updated_at: Some(raw.update_time.and_then(from_unix_seconds).unwrap_or(now)),
		added_to_database: now,
		message_count: messages.len() as i64,
		messages,
		source,
	}
}

/// Opaque cosmetic identifier; roughly unique, not a key and not a secret.
pub fn random_id() -> String {
	Uuid::new_v4().simple().to_string()
}

pub fn from_unix_seconds(seconds: f64) -> Option<OffsetDateTime> {
	if !seconds.is_finite() {
		return None;
	}

	OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9) as i128).ok()
}

fn flatten_node(node: &MappingNode) -> Option<ChatMessage> {
	let message = node.message.as_ref()?;
	let role = message.author.as_ref()?.role.as_deref()?;

	if !KEPT_ROLES.contains(&role) {
		return None;
	}

	let parts = &message.content.as_ref()?.parts;
	let joined = parts.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("\n");
	let content = joined.trim();

	if content.is_empty() {
		return None;
	}

	Some(ChatMessage {
		role: role.to_string(),
		content: content.to_string(),
		timestamp: message.create_time,
	})
}
