use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::CoachError;
use crate::logging::log_model_call;
use crate::models::{build_http_client, TextGenerator};
use crate::perf;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text of the first candidate
fn response_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Google Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiModel {
    model_name: String,
    api_key: String,
    client: Client,
}

impl GeminiModel {
    pub fn new(model_name: &str, api_key: &str, timeout_secs: Option<u64>) -> Result<Self, CoachError> {
        Ok(GeminiModel {
            model_name: model_name.to_string(),
            api_key: api_key.to_string(),
            client: build_http_client(timeout_secs)?,
        })
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model_name);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest {
                contents: vec![RequestContent {
                    parts: vec![RequestPart { text: prompt }],
                }],
            })
            .send()
            .await
            .with_context(|| format!("Failed to connect to Gemini API for model '{}'", self.model_name))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from model '{}'", self.model_name))?;
        if !status.is_success() {
            anyhow::bail!(
                "Gemini API returned {} for model '{}': {}",
                status,
                self.model_name,
                body.chars().take(500).collect::<String>()
            );
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .with_context(|| format!("Unexpected Gemini response shape for model '{}'", self.model_name))?;
        response_text(parsed)
            .ok_or_else(|| anyhow::anyhow!("Model '{}' returned empty response", self.model_name))
    }
}

impl TextGenerator for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let timer = perf::PerfTimer::new("gemini_call");
        let result = self.call(prompt).await;
        log_model_call(&self.model_name, "generate", result.is_ok(), timer.elapsed_ms());
        result
    }
}
