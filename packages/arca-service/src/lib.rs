pub mod chat;
pub mod get;
pub mod import;
pub mod list;
pub mod models;
pub mod save;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use chat::{ChatMetrics, ChatRequest, ChatResponse};
pub use import::{ImportRequest, ImportResponse};
pub use list::ListResponse;
pub use models::ModelsResponse;
pub use save::{SaveRequest, SaveResponse};
pub use search::{SearchHit, SearchRequest, SearchResponse};

use arca_config::{Config, InferenceServer};
use arca_domain::Source;
use arca_providers::{ChatCompletion, ModelInfo, lmstudio, ollama};
use arca_storage::db::Db;

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One locally hosted inference server, seam for test fakes.
pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn chat<'a>(
		&'a self,
		cfg: &'a InferenceServer,
		model: &'a str,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<ChatCompletion>>;

	fn list_models<'a>(
		&'a self,
		cfg: &'a InferenceServer,
	) -> BoxFuture<'a, color_eyre::Result<Vec<ModelInfo>>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	NotFound { message: String },
	Provider { message: String },
	Storage { message: String },
}

#[derive(Clone)]
pub struct Providers {
	pub ollama: Arc<dyn ChatProvider>,
	pub lmstudio: Arc<dyn ChatProvider>,
}

pub struct ArcaService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}

struct OllamaProvider;
struct LmstudioProvider;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::NotFound { message } => write!(f, "Not found: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<arca_storage::Error> for ServiceError {
	fn from(err: arca_storage::Error) -> Self {
		match err {
			arca_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			arca_storage::Error::InvalidDocument(message) => Self::Storage { message },
		}
	}
}

impl From<color_eyre::Report> for ServiceError {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl ChatProvider for OllamaProvider {
	fn chat<'a>(
		&'a self,
		cfg: &'a InferenceServer,
		model: &'a str,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<ChatCompletion>> {
		Box::pin(ollama::chat(cfg, model, messages))
	}

	fn list_models<'a>(
		&'a self,
		cfg: &'a InferenceServer,
	) -> BoxFuture<'a, color_eyre::Result<Vec<ModelInfo>>> {
		Box::pin(ollama::list_models(cfg))
	}
}

impl ChatProvider for LmstudioProvider {
	fn chat<'a>(
		&'a self,
		cfg: &'a InferenceServer,
		model: &'a str,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<ChatCompletion>> {
		Box::pin(lmstudio::chat(cfg, model, messages))
	}

	fn list_models<'a>(
		&'a self,
		cfg: &'a InferenceServer,
	) -> BoxFuture<'a, color_eyre::Result<Vec<ModelInfo>>> {
		Box::pin(lmstudio::list_models(cfg))
	}
}

impl Providers {
	pub fn new(ollama: Arc<dyn ChatProvider>, lmstudio: Arc<dyn ChatProvider>) -> Self {
		Self { ollama, lmstudio }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { ollama: Arc::new(OllamaProvider), lmstudio: Arc::new(LmstudioProvider) }
	}
}

impl ArcaService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}

	pub(crate) fn inference_target(
		&self,
		provider: Source,
	) -> ServiceResult<(&InferenceServer, &Arc<dyn ChatProvider>)> {
		match provider {
			Source::Ollama => Ok((&self.cfg.providers.ollama, &self.providers.ollama)),
			Source::Lmstudio => Ok((&self.cfg.providers.lmstudio, &self.providers.lmstudio)),
			Source::Chatgpt => Err(ServiceError::InvalidRequest {
				message: "No inference server is configured for chatgpt.".to_string(),
			}),
		}
	}
}
