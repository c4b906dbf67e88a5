//! Raw conversation-export shapes.
//!
//! Exports in the wild are ragged: nodes without messages, messages without
//! authors, multimodal parts mixed into the text parts. Every field that can
//! be absent is optional so one corrupt node never fails the whole record.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct RawConversation {
	pub id: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub create_time: Option<f64>,
	#[serde(default)]
	pub update_time: Option<f64>,
	#[serde(default)]
	pub default_model_slug: Option<String>,
	#[serde(default)]
	pub current_node: Option<String>,
	#[serde(default)]
	pub mapping: Option<BTreeMap<String, MappingNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingNode {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub message: Option<RawMessage>,
	#[serde(default)]
	pub parent: Option<String>,
	#[serde(default)]
	pub children: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
	#[serde(default)]
	pub author: Option<RawAuthor>,
	#[serde(default)]
	pub content: Option<RawContent>,
	#[serde(default)]
	pub create_time: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
	#[serde(default)]
	pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContent {
	/// Text fragments, possibly interleaved with non-string multimodal parts.
	#[serde(default)]
	pub parts: Vec<Value>,
}
