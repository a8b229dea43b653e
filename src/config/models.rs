use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:7b-instruct";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Which text-generation backend answers prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    Gemini,
    Ollama,
}

impl Default for ModelProvider {
    fn default() -> Self {
        ModelProvider::Gemini
    }
}

impl ModelProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelProvider::Gemini => DEFAULT_GEMINI_MODEL,
            ModelProvider::Ollama => DEFAULT_OLLAMA_MODEL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    /// Model name passed to the backend. Unset means the provider's default.
    pub name: Option<String>,
    /// Gemini API key. Overridden by GOOGLE_API_KEY.
    pub api_key: Option<String>,
    pub ollama_url: String,
    /// No timeout when unset; a hung backend then hangs the command
    pub request_timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            provider: ModelProvider::Gemini,
            name: None,
            api_key: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ModelConfig {
    /// Configured model name, or the provider's default when unset or blank
    pub fn model_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }
}
