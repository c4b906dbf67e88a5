use arca_domain::{Conversation, Source};
use arca_storage::conversations;

use crate::{ArcaService, ServiceResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ListResponse {
	pub count: usize,
	pub conversations: Vec<Conversation>,
}

impl ArcaService {
	/// Returns every stored conversation across all source collections,
	/// newest-updated first. Documents without `updated_at` sort oldest.
	pub async fn list(&self) -> ServiceResult<ListResponse> {
		// Independent reads, merged after all complete.
		let (chatgpt, ollama, lmstudio) = tokio::try_join!(
			conversations::fetch_by_source(&self.db.pool, Source::Chatgpt),
			conversations::fetch_by_source(&self.db.pool, Source::Ollama),
			conversations::fetch_by_source(&self.db.pool, Source::Lmstudio),
		)?;
		let mut all = chatgpt;

		all.extend(ollama);
		all.extend(lmstudio);
		// Descending; None < Some, so undated documents land at the end.
		all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

		Ok(ListResponse { count: all.len(), conversations: all })
	}
}
