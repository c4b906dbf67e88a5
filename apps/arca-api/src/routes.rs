use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use arca_domain::{Conversation, Source};
use arca_service::{
	ChatRequest, ChatResponse, ImportRequest, ImportResponse, ListResponse, ModelsResponse,
	SaveRequest, SaveResponse, SearchRequest, SearchResponse, ServiceError,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/conversations", get(list))
		.route("/v1/conversations/import", post(import))
		.route("/v1/conversations/{id}", get(get_by_id))
		.route("/v1/search", post(search))
		.route("/v1/chat/{provider}/completions", post(chat))
		.route("/v1/chat/{provider}/models", get(models))
		.route("/v1/chat/{provider}/save", post(save))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list().await?;
	Ok(Json(response))
}

async fn get_by_id(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
	let response = state.service.get(&id).await?;
	Ok(Json(response))
}

async fn import(
	State(state): State<AppState>,
	Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
	let response = state.service.import(payload).await?;
	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;
	Ok(Json(response))
}

async fn chat(
	State(state): State<AppState>,
	Path(provider): Path<String>,
	Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
	let provider = parse_provider(&provider)?;
	let response = state.service.chat(provider, payload).await?;
	Ok(Json(response))
}

async fn models(
	State(state): State<AppState>,
	Path(provider): Path<String>,
) -> Result<Json<ModelsResponse>, ApiError> {
	let provider = parse_provider(&provider)?;
	let response = state.service.models(provider).await?;
	Ok(Json(response))
}

async fn save(
	State(state): State<AppState>,
	Path(provider): Path<String>,
	Json(payload): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
	let provider = parse_provider(&provider)?;
	let response = state.service.save(provider, payload).await?;
	Ok(Json(response))
}

/// Chat routes address an inference server, so the archival-only source is
/// rejected along with unknown names.
fn parse_provider(raw: &str) -> Result<Source, ApiError> {
	match Source::parse(raw) {
		Some(source @ (Source::Ollama | Source::Lmstudio)) => Ok(source),
		_ => Err(ApiError::new(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			format!("Unknown provider {raw:?}; expected \"ollama\" or \"lmstudio\"."),
		)),
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => {
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
			},
			ServiceError::NotFound { message } => {
				Self::new(StatusCode::NOT_FOUND, "not_found", message)
			},
			ServiceError::Provider { message } => {
				Self::new(StatusCode::BAD_GATEWAY, "provider_error", message)
			},
			ServiceError::Storage { message } => {
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn provider_names_are_restricted_to_inference_servers() {
		assert_eq!(parse_provider("ollama").expect("provider"), Source::Ollama);
		assert_eq!(parse_provider("lmstudio").expect("provider"), Source::Lmstudio);
		assert!(parse_provider("chatgpt").is_err());
		assert!(parse_provider("openai").is_err());
	}
}
