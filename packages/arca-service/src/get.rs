use arca_domain::{Conversation, Source};
use arca_storage::conversations;

use crate::{ArcaService, ServiceError, ServiceResult};

impl ArcaService {
	/// Looks a conversation up across all source collections in the fixed
	/// order of [`Source::ALL`], returning the first match.
	pub async fn get(&self, conversation_id: &str) -> ServiceResult<Conversation> {
		let conversation_id = conversation_id.trim();

		if conversation_id.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "conversation_id must be non-empty.".to_string(),
			});
		}

		for source in Source::ALL {
			if let Some(conversation) =
				conversations::fetch_by_id(&self.db.pool, source, conversation_id).await?
			{
				return Ok(conversation);
			}
		}

		Err(ServiceError::NotFound {
			message: format!("No conversation with id {conversation_id:?}."),
		})
	}
}
