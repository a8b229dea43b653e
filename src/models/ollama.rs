use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::CoachError;
use crate::logging::log_model_call;
use crate::models::{build_http_client, TextGenerator};
use crate::perf;

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
    #[serde(default)]
    done: bool,
}

/// Join a streamed Ollama body (one JSON object per line) into the full text
fn collect_stream(body: &str) -> String {
    let mut full_response = String::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(res) = serde_json::from_str::<OllamaResponse>(line) {
            full_response.push_str(&res.response);
            if res.done {
                break;
            }
        }
    }
    full_response
}

/// Local Ollama server client
#[derive(Clone)]
pub struct OllamaModel {
    model_name: String,
    base_url: String,
    client: Client,
}

impl OllamaModel {
    pub fn new(model_name: &str, base_url: &str, timeout_secs: Option<u64>) -> Result<Self, CoachError> {
        Ok(OllamaModel {
            model_name: model_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout_secs)?,
        })
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        let request_start = std::time::Instant::now();
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&OllamaRequest {
                model: &self.model_name,
                prompt,
                stream: true,
            })
            .send()
            .await
            .with_context(|| format!("Failed to connect to Ollama API for model '{}'", self.model_name))?
            .error_for_status()
            .with_context(|| format!("Ollama rejected request for model '{}'", self.model_name))?;
        perf::log_perf_with_context("ollama_connect", request_start.elapsed().as_millis() as u64, &self.model_name);

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from model '{}'", self.model_name))?;

        let full_response = collect_stream(&text);
        if full_response.is_empty() {
            anyhow::bail!("Model '{}' returned empty response", self.model_name);
        }
        Ok(full_response)
    }
}

impl TextGenerator for OllamaModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let timer = perf::PerfTimer::new("ollama_call");
        let result = self.call(prompt).await;
        log_model_call(&self.model_name, "generate", result.is_ok(), timer.elapsed_ms());
        result
    }
}
