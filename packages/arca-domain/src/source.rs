use std::fmt;

/// Which system produced a stored conversation. Each source is its own
/// logical collection in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
	Chatgpt,
	Ollama,
	Lmstudio,
}

impl Source {
	/// Fixed probe order for cross-collection lookups.
	pub const ALL: [Self; 3] = [Self::Chatgpt, Self::Ollama, Self::Lmstudio];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Chatgpt => "chatgpt",
			Self::Ollama => "ollama",
			Self::Lmstudio => "lmstudio",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"chatgpt" => Some(Self::Chatgpt),
			"ollama" => Some(Self::Ollama),
			"lmstudio" => Some(Self::Lmstudio),
			_ => None,
		}
	}

	/// Title used when a locally run chat is saved without one.
	pub fn default_transcript_title(&self) -> &'static str {
		match self {
			Self::Chatgpt => "ChatGPT Conversation",
			Self::Ollama => "Ollama Conversation",
			Self::Lmstudio => "LM Studio Conversation",
		}
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
