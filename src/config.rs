//! Engine configuration.
//!
//! Everything has a sensible default; a config file only needs the keys it
//! wants to change. Loaded from YAML, validated before a run starts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub assistant: AssistantConfig,
    pub detection: DetectionConfig,
}

impl EngineConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Settings for the external text/vision assistant.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// When false, the planner goes straight to deterministic fallbacks.
    pub enabled: bool,
    /// Ollama server host:port.
    pub host: String,
    /// Model to generate suggestions with.
    pub model: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retry attempts after the first failure.
    pub max_retries: u32,
    /// Base backoff between retries, doubled per attempt.
    pub backoff_ms: u64,
    /// Suggestion cache lifetime; 0 disables the cache.
    pub cache_ttl_hours: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            timeout_ms: 90_000,
            max_retries: 3,
            backoff_ms: 500,
            cache_ttl_hours: 24,
        }
    }
}

/// Thresholds used by the detectors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Accepted font-size floor in points.
    pub min_font_pt: f32,
    /// Sizes below this are flagged medium instead of low.
    pub severe_font_pt: f32,
    /// Minimum trimmed length before all-caps text is flagged.
    pub all_caps_min_chars: usize,
    /// Cap on generated link-text replacement candidates.
    pub max_suggestions: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_font_pt: 12.0,
            severe_font_pt: 9.0,
            all_caps_min_chars: 10,
            max_suggestions: 3,
        }
    }
}

/// Check a parsed configuration for inconsistent values.
pub fn validate(config: &EngineConfig) -> anyhow::Result<()> {
    let d = &config.detection;
    if d.min_font_pt <= 0.0 {
        anyhow::bail!("detection.min_font_pt must be positive, got {}", d.min_font_pt);
    }
    if d.severe_font_pt > d.min_font_pt {
        anyhow::bail!(
            "detection.severe_font_pt ({}) must not exceed detection.min_font_pt ({})",
            d.severe_font_pt,
            d.min_font_pt
        );
    }
    if d.max_suggestions == 0 {
        anyhow::bail!("detection.max_suggestions must be at least 1");
    }

    let a = &config.assistant;
    if a.enabled {
        if a.host.trim().is_empty() {
            anyhow::bail!("assistant.host must not be empty");
        }
        if a.model.trim().is_empty() {
            anyhow::bail!("assistant.model must not be empty");
        }
        if a.timeout_ms == 0 {
            anyhow::bail!("assistant.timeout_ms must be positive");
        }
    }

    Ok(())
}
