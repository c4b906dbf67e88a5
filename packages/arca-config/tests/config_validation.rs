use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use arca_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
	let nanos =
		SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock before epoch.").as_nanos();
	let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
	let path = env::temp_dir().join(format!("arca_config_{nanos}_{unique}.toml"));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::map::Map<String, Value>),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = value.as_table_mut().expect("Sample config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render sample config.")
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML);
	let cfg: Config = arca_config::load(&path).expect("Sample config must load.");

	fs::remove_file(&path).ok();

	assert_eq!(cfg.service.http_bind, "127.0.0.1:7310");
	assert_eq!(cfg.providers.ollama.default_model.as_deref(), Some("llama2"));
	assert_eq!(cfg.providers.lmstudio.default_model, None);
}

#[test]
fn trailing_slash_is_trimmed_from_api_base() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML);
	let cfg = arca_config::load(&path).expect("Sample config must load.");

	fs::remove_file(&path).ok();

	assert_eq!(cfg.providers.lmstudio.api_base, "http://localhost:1234");
}

#[test]
fn blank_default_model_becomes_none() {
	let rendered = sample_with(|root| {
		let providers = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [providers].");
		let ollama = providers
			.get_mut("ollama")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [providers.ollama].");

		ollama.insert("default_model".to_string(), Value::String("  ".to_string()));
	});
	let path = write_temp_config(&rendered);
	let cfg = arca_config::load(&path).expect("Config must load.");

	fs::remove_file(&path).ok();

	assert_eq!(cfg.providers.ollama.default_model, None);
}

#[test]
fn rejects_empty_dsn() {
	let rendered = sample_with(|root| {
		let storage = root
			.get_mut("storage")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [storage].");
		let postgres = storage
			.get_mut("postgres")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [storage.postgres].");

		postgres.insert("dsn".to_string(), Value::String(String::new()));
	});
	let path = write_temp_config(&rendered);
	let result = arca_config::load(&path);

	fs::remove_file(&path).ok();

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn rejects_non_http_api_base() {
	let rendered = sample_with(|root| {
		let providers = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [providers].");
		let lmstudio = providers
			.get_mut("lmstudio")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [providers.lmstudio].");

		lmstudio.insert("api_base".to_string(), Value::String("localhost:1234".to_string()));
	});
	let path = write_temp_config(&rendered);
	let result = arca_config::load(&path);

	fs::remove_file(&path).ok();

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn rejects_zero_timeout() {
	let rendered = sample_with(|root| {
		let providers = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [providers].");
		let ollama = providers
			.get_mut("ollama")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [providers.ollama].");

		ollama.insert("timeout_ms".to_string(), Value::Integer(0));
	});
	let path = write_temp_config(&rendered);
	let result = arca_config::load(&path);

	fs::remove_file(&path).ok();

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn missing_file_is_a_read_error() {
	let path = env::temp_dir().join("arca_config_does_not_exist.toml");
	let result = arca_config::load(&path);

	assert!(matches!(result, Err(Error::ReadConfig { .. })));
}
