use regex::{Regex, RegexBuilder};
use time::OffsetDateTime;

use arca_domain::Source;
use arca_storage::conversations;

use crate::{ArcaService, ServiceError, ServiceResult};

/// Collection filter meaning "search every source collection".
pub const ALL_COLLECTIONS: &str = "all";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// A source collection name, or [`ALL_COLLECTIONS`] (the default).
	#[serde(default)]
	pub collection: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchHit {
	pub conversation_id: String,
	pub title: String,
	pub source: Source,
	pub matched_message: String,
	/// Position of the matched message within its conversation.
	pub message_index: usize,
	#[serde(with = "arca_domain::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "arca_domain::time_serde::option")]
	pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub count: usize,
	pub results: Vec<SearchHit>,
}

impl ArcaService {
	/// Case-insensitive substring search over every stored message in the
	/// requested collections. The query is validated before any storage
	/// access; hits are ordered by the owning conversation's `updated_at`
	/// descending.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let matcher = build_matcher(&req.query)?;
		let sources = resolve_sources(req.collection.as_deref())?;
		let mut results = Vec::new();

		for source in sources {
			let stored = conversations::fetch_by_source(&self.db.pool, source).await?;

			for conversation in stored {
				for (message_index, message) in conversation.messages.iter().enumerate() {
					if !matcher.is_match(&message.content) {
						continue;
					}

					results.push(SearchHit {
						conversation_id: conversation.conversation_id.clone(),
						title: conversation.title.clone(),
						source: conversation.source,
						matched_message: message.content.clone(),
						message_index,
						created_at: conversation.created_at,
						updated_at: conversation.updated_at,
					});
				}
			}
		}

		results.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

		Ok(SearchResponse { count: results.len(), results })
	}
}

/// Escaped, case-insensitive matcher: plain substring semantics, no user
/// regex syntax.
fn build_matcher(query: &str) -> ServiceResult<Regex> {
	if query.trim().is_empty() {
		return Err(ServiceError::InvalidRequest {
			message: "Search query is required.".to_string(),
		});
	}

	RegexBuilder::new(&regex::escape(query))
		.case_insensitive(true)
		.build()
		.map_err(|err| ServiceError::InvalidRequest { message: err.to_string() })
}

fn resolve_sources(collection: Option<&str>) -> ServiceResult<Vec<Source>> {
	match collection {
		None => Ok(Source::ALL.to_vec()),
		Some(raw) if raw.eq_ignore_ascii_case(ALL_COLLECTIONS) => Ok(Source::ALL.to_vec()),
		Some(raw) => match Source::parse(raw) {
			Some(source) => Ok(vec![source]),
			None => Err(ServiceError::InvalidRequest {
				message: format!("Unknown collection {raw:?}."),
			}),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_query_is_rejected() {
		assert!(matches!(build_matcher(""), Err(ServiceError::InvalidRequest { .. })));
		assert!(matches!(build_matcher("   "), Err(ServiceError::InvalidRequest { .. })));
	}

	#[test]
	fn matcher_is_case_insensitive_substring() {
		let matcher = build_matcher("banana").expect("matcher");

		assert!(matcher.is_match("I bought a Banana today."));
		assert!(matcher.is_match("BANANAS galore"));
		assert!(!matcher.is_match("apple pie"));
	}

	#[test]
	fn regex_metacharacters_are_literal() {
		let matcher = build_matcher("what?").expect("matcher");

		assert!(matcher.is_match("And then what?"));
		assert!(!matcher.is_match("And then what!"));
	}

	#[test]
	fn all_and_missing_collection_cover_every_source() {
		assert_eq!(resolve_sources(None).expect("sources"), Source::ALL.to_vec());
		assert_eq!(resolve_sources(Some("all")).expect("sources"), Source::ALL.to_vec());
		assert_eq!(resolve_sources(Some("ALL")).expect("sources"), Source::ALL.to_vec());
	}

	#[test]
	fn named_collection_is_scoped() {
		assert_eq!(resolve_sources(Some("ollama")).expect("sources"), vec![Source::Ollama]);
	}

	#[test]
	fn unknown_collection_is_rejected() {
		assert!(matches!(
			resolve_sources(Some("mystery")),
			Err(ServiceError::InvalidRequest { .. })
		));
	}
}
