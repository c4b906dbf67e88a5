pub mod export;
pub mod normalize;
pub mod time_serde;

mod source;

pub use normalize::{DEFAULT_TITLE, normalize, random_id};
pub use source::Source;

use time::OffsetDateTime;

/// One turn of a flattened transcript.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
	pub role: String,
	pub content: String,
	/// Unix seconds from the export, when the node carried one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<f64>,
}

/// A normalized conversation document, keyed by `(source, conversation_id)`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Conversation {
	pub conversation_id: String,
	pub random_id: String,
	pub title: String,
	pub default_model_slug: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	/// Nullable so documents written before this field existed sort oldest.
	#[serde(with = "crate::time_serde::option")]
	pub updated_at: Option<OffsetDateTime>,
	/// Stamped at first insert and preserved across every later upsert.
	#[serde(with = "crate::time_serde")]
	pub added_to_database: OffsetDateTime,
	pub messages: Vec<ChatMessage>,
	pub message_count: i64,
	pub source: Source,
}
