use arca_domain::{Conversation, Source, export::RawConversation, normalize};
use arca_storage::conversations;

use crate::{ArcaService, ServiceResult};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ImportRequest {
	pub conversations: Vec<RawConversation>,
	/// Defaults to the manual-upload tag.
	#[serde(default)]
	pub source: Option<Source>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImportResponse {
	pub count: usize,
	pub inserted: u64,
	pub modified: u64,
}

impl ArcaService {
	/// Normalizes a batch of raw export records and upserts them into the
	/// source's collection. Best effort per document, not transactional.
	pub async fn import(&self, req: ImportRequest) -> ServiceResult<ImportResponse> {
		let source = req.source.unwrap_or(Source::Chatgpt);
		let normalized: Vec<Conversation> =
			req.conversations.iter().map(|raw| normalize(raw, source)).collect();
		let outcome = conversations::upsert_many(&self.db.pool, &normalized).await?;

		tracing::info!(
			count = normalized.len(),
			inserted = outcome.inserted,
			modified = outcome.modified,
			%source,
			"Imported conversations."
		);

		Ok(ImportResponse {
			count: normalized.len(),
			inserted: outcome.inserted,
			modified: outcome.modified,
		})
	}
}
