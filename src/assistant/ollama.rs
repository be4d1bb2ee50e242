//! Ollama-backed assistant.
//!
//! Talks to a local Ollama server via: POST http://{host}/api/generate
//! Every call has a hard timeout and a bounded retry budget with
//! exponential backoff; exhaustion surfaces as an error the planner turns
//! into a deterministic fallback.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AssistantConfig;

use super::{
    clean_suggestion, AltTextRequest, Assistant, AssistantError, LinkTextRequest, SuggestionCache,
};

/// Assistant implementation backed by an Ollama server.
pub struct OllamaAssistant {
    http: reqwest::Client,
    host: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
    cache: Option<SuggestionCache>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Low temperature keeps suggestions terse and repeatable.
#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("accesscheck/0.1.0")
            .build()
            .expect("failed to create HTTP client");

        let cache = if config.cache_ttl_hours > 0 {
            Some(SuggestionCache::new(config.cache_ttl_hours))
        } else {
            None
        };

        Self {
            http,
            host: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.backoff_ms),
            cache,
        }
    }

    /// One generation with cache, retries, and backoff.
    async fn generate(&self, cache_key: &str, prompt: &str) -> Result<String, AssistantError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(cache_key) {
                debug!(key = cache_key, "suggestion served from cache");
                return Ok(hit);
            }
        }

        let mut last_error = AssistantError::Unavailable("no attempts made".to_string());

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff * 2u32.saturating_pow(attempt - 1);
                debug!(attempt, ?delay, "retrying assistant call");
                tokio::time::sleep(delay).await;
            }

            match self.request(prompt).await {
                Ok(text) if text.trim().is_empty() => {
                    warn!(attempt, "assistant returned empty text");
                    last_error = AssistantError::Empty;
                }
                Ok(text) => {
                    if let Some(cache) = &self.cache {
                        cache.set(cache_key, &text);
                    }
                    return Ok(text);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "assistant call failed");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn request(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!("http://{}/api/generate", self.host);
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.3,
                top_p: 0.9,
                num_predict: 256,
            },
        };

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else {
                    AssistantError::Network(e)
                }
            })?;

        match response.status().as_u16() {
            200 => {
                let body: GenerateResponse =
                    response.json().await.map_err(AssistantError::Network)?;
                Ok(body.response)
            }
            status => Err(AssistantError::Unavailable(format!("HTTP {}", status))),
        }
    }
}

impl Assistant for OllamaAssistant {
    async fn suggest_alt_text(
        &self,
        request: &AltTextRequest<'_>,
    ) -> Result<String, AssistantError> {
        let cache_key = format!("alt:{}", request.source.unwrap_or("unknown"));
        let prompt = build_alt_text_prompt(request);
        let raw = self.generate(&cache_key, &prompt).await?;
        Ok(clean_suggestion(&raw))
    }

    async fn suggest_link_text(
        &self,
        request: &LinkTextRequest<'_>,
    ) -> Result<String, AssistantError> {
        let cache_key = format!("link:{}", request.target);
        let prompt = build_link_text_prompt(request);
        let raw = self.generate(&cache_key, &prompt).await?;
        Ok(clean_suggestion(&raw))
    }
}

fn build_alt_text_prompt(request: &AltTextRequest<'_>) -> String {
    let mut prompt = String::from(
        "You are a WCAG 2.1 AA accessibility expert. Write alt text for an \
         image in a slide deck.\n\
         Rules: under 125 characters, describe content and purpose, no \
         phrases like 'image of'. For charts include the key data point. \
         Respond with ONLY the alt text.\n",
    );
    if let Some(source) = request.source {
        prompt.push_str(&format!("Image source: {}\n", source));
    }
    if let Some(current) = request.current_alt {
        prompt.push_str(&format!("Current alt text (inadequate): {:?}\n", current));
    }
    prompt.push_str(&format!("Slide context: {}\n", request.page_context));
    prompt
}

fn build_link_text_prompt(request: &LinkTextRequest<'_>) -> String {
    format!(
        "You are a WCAG 2.1 AA accessibility expert. Rewrite vague link text \
         so it describes the destination.\n\
         Rules: short, specific, mention document format when obvious, never \
         'click here'. Respond with ONLY the replacement text.\n\
         Current text: {:?}\nLink target: {}\nSlide context: {}\n",
        request.current_text, request.target, request.page_context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_carry_context() {
        let prompt = build_alt_text_prompt(&AltTextRequest {
            source: Some("media/chart.png"),
            current_alt: Some("image"),
            page_context: "Enrollment trends 2020-2023",
        });
        assert!(prompt.contains("media/chart.png"));
        assert!(prompt.contains("Enrollment trends"));
        assert!(prompt.contains("ONLY the alt text"));

        let prompt = build_link_text_prompt(&LinkTextRequest {
            target: "https://example.edu/report.pdf",
            current_text: "click here",
            page_context: "Reading List",
        });
        assert!(prompt.contains("report.pdf"));
        assert!(prompt.contains("click here"));
    }

    #[test]
    fn test_host_trailing_slash_trimmed() {
        let config = AssistantConfig {
            host: "localhost:11434/".to_string(),
            cache_ttl_hours: 0,
            ..AssistantConfig::default()
        };
        let assistant = OllamaAssistant::new(&config);
        assert_eq!(assistant.host, "localhost:11434");
        assert!(assistant.cache.is_none());
    }
}
