use std::sync::Arc;

use arca_service::ArcaService;
use arca_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ArcaService>,
}
impl AppState {
	pub async fn new(config: arca_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = ArcaService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
