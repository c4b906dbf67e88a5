use arca_domain::Source;
use arca_providers::ModelInfo;

use crate::{ArcaService, ServiceResult};

#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelsResponse {
	pub models: Vec<ModelInfo>,
}

impl ArcaService {
	/// Lists the models the requested inference server currently offers.
	pub async fn models(&self, provider: Source) -> ServiceResult<ModelsResponse> {
		let (cfg, client) = self.inference_target(provider)?;
		let models = client.list_models(cfg).await?;

		Ok(ModelsResponse { models })
	}
}
