use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub ollama: InferenceServer,
	pub lmstudio: InferenceServer,
}

/// Connection settings for one locally hosted inference server.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceServer {
	pub api_base: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_model: Option<String>,
}
