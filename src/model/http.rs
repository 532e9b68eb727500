use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{GenParams, GenerateError, TextGenerator, estimate_tokens};

/// Adapter for an HTTP text-generation endpoint (text-generation-inference
/// wire shape: POST `{endpoint}/generate` with `{inputs, parameters}`,
/// response `{generated_text}`).
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl HttpGenerator {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    /// One-shot availability probe, run once at startup. A failure here
    /// puts the engine in fallback mode for the life of the process, so
    /// no per-request call is ever attempted against a dead endpoint.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/health", self.endpoint);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                info!(endpoint = %self.endpoint, "model endpoint healthy");
                true
            }
            Ok(resp) => {
                warn!(endpoint = %self.endpoint, status = %resp.status(), "model endpoint unhealthy");
                false
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, "model endpoint unreachable: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str, params: &GenParams) -> Result<String, GenerateError> {
        let prompt_tokens = estimate_tokens(prompt);
        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "do_sample": true,
                "temperature": params.temperature,
                "top_p": params.top_p,
                "no_repeat_ngram_size": params.no_repeat_ngram,
                "min_length": prompt_tokens + params.min_new_tokens,
                "max_length": prompt_tokens + params.max_new_tokens,
            },
        });

        debug!(prompt_tokens, "calling model endpoint");

        let call = async {
            let response = self
                .client
                .post(format!("{}/generate", self.endpoint))
                .json(&body)
                .send()
                .await
                .map_err(|e| GenerateError::Request(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(GenerateError::Api { status, body });
            }

            let parsed: serde_json::Value = response
                .json()
                .await
                .map_err(|e| GenerateError::Decode(e.to_string()))?;

            // Endpoint returns either an object or a one-element array.
            let text = parsed
                .get("generated_text")
                .and_then(|t| t.as_str())
                .or_else(|| {
                    parsed
                        .as_array()
                        .and_then(|a| a.first())
                        .and_then(|v| v.get("generated_text"))
                        .and_then(|t| t.as_str())
                })
                .ok_or_else(|| GenerateError::Decode("missing generated_text".into()))?;

            Ok(text.to_string())
        };

        match timeout(Duration::from_secs(self.timeout_secs), call).await {
            Ok(result) => result,
            Err(_) => Err(GenerateError::Timeout(self.timeout_secs)),
        }
    }
}
