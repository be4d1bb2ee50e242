//! External text/vision assistant interface.
//!
//! The engine delegates content generation to an assistant for exactly two
//! things: alt-text and link-text suggestions. Both operations can fail
//! (timeout, unavailable, empty output) and both are advisory; the planner
//! validates everything that comes back and falls back to deterministic
//! placeholders rather than stalling a run.

mod cache;
mod ollama;
mod stub;

pub use cache::SuggestionCache;
pub use ollama::OllamaAssistant;
pub use stub::StubAssistant;

use thiserror::Error;

/// Errors from assistant calls. All of them are recoverable; the planner
/// degrades to fallbacks.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("assistant returned empty text")]
    Empty,
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
}

/// Context for an alt-text suggestion.
#[derive(Debug, Clone)]
pub struct AltTextRequest<'a> {
    /// Source reference of the image, when the parser preserved one.
    pub source: Option<&'a str>,
    /// Current alt text, when improving rather than creating.
    pub current_alt: Option<&'a str>,
    /// Surrounding page text, truncated by the caller.
    pub page_context: &'a str,
}

/// Context for a link-text suggestion.
#[derive(Debug, Clone)]
pub struct LinkTextRequest<'a> {
    pub target: &'a str,
    pub current_text: &'a str,
    pub page_context: &'a str,
}

/// The two-operation capability contract the engine depends on.
pub trait Assistant {
    fn suggest_alt_text(
        &self,
        request: &AltTextRequest<'_>,
    ) -> impl std::future::Future<Output = Result<String, AssistantError>>;

    fn suggest_link_text(
        &self,
        request: &LinkTextRequest<'_>,
    ) -> impl std::future::Future<Output = Result<String, AssistantError>>;
}

/// Longest alt text worth generating; anything more belongs in body text.
pub const MAX_SUGGESTION_CHARS: usize = 125;

/// Normalize raw assistant output into usable suggestion text: strip
/// wrapping quotes and redundant lead-ins, capitalize, cap the length.
pub fn clean_suggestion(raw: &str) -> String {
    let mut text = raw.trim().trim_matches(['"', '\'']).trim().to_string();

    const REDUNDANT_PREFIXES: &[&str] = &[
        "image of ",
        "picture of ",
        "photo of ",
        "graphic of ",
        "screenshot of ",
        "image: ",
        "alt text: ",
    ];
    let lowered = text.to_lowercase();
    for prefix in REDUNDANT_PREFIXES {
        if lowered.starts_with(prefix) {
            text = text.chars().skip(prefix.chars().count()).collect();
            break;
        }
    }

    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        if first.is_lowercase() {
            text = first.to_uppercase().collect::<String>() + chars.as_str();
        }
    }

    if text.chars().count() > MAX_SUGGESTION_CHARS {
        let cut: String = text.chars().take(MAX_SUGGESTION_CHARS - 3).collect();
        text = format!("{}...", cut.trim_end());
    }

    text
}
