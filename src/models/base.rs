use crate::config::{AppConfig, ModelProvider};
use crate::error::CoachError;
use crate::models::gemini::GeminiModel;
use crate::models::ollama::OllamaModel;

/// Free-text in, free-text out. Used both for problem suggestions and for
/// notification prose.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Unified model wrapper enum
#[derive(Clone)]
pub enum LanguageModel {
    Gemini(GeminiModel),
    Ollama(OllamaModel),
}

impl LanguageModel {
    /// Build the configured backend. Gemini without an API key is a
    /// configuration error.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoachError> {
        let model = &config.model;
        match model.provider {
            ModelProvider::Gemini => {
                let api_key = config.require_api_key()?;
                Ok(LanguageModel::Gemini(GeminiModel::new(
                    model.model_name(),
                    api_key,
                    model.request_timeout_secs,
                )?))
            }
            ModelProvider::Ollama => Ok(LanguageModel::Ollama(OllamaModel::new(
                model.model_name(),
                &model.ollama_url,
                model.request_timeout_secs,
            )?)),
        }
    }
}

impl TextGenerator for LanguageModel {
    fn name(&self) -> &str {
        match self {
            LanguageModel::Gemini(m) => m.name(),
            LanguageModel::Ollama(m) => m.name(),
        }
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        match self {
            LanguageModel::Gemini(m) => m.generate(prompt).await,
            LanguageModel::Ollama(m) => m.generate(prompt).await,
        }
    }
}
