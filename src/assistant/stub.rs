//! Deterministic assistant stub.
//!
//! Used by tests and by offline runs. Returns canned suggestions, or fails
//! every call when constructed with [`StubAssistant::unavailable`] so the
//! planner's fallback paths can be exercised without a network.

use super::{AltTextRequest, Assistant, AssistantError, LinkTextRequest};

/// Canned-response assistant. `None` fields make the corresponding
/// operation fail as unavailable.
#[derive(Debug, Clone, Default)]
pub struct StubAssistant {
    alt_text: Option<String>,
    link_text: Option<String>,
}

impl StubAssistant {
    /// An assistant whose every call fails.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// An assistant answering both operations with fixed text.
    pub fn with_suggestions(alt_text: &str, link_text: &str) -> Self {
        Self {
            alt_text: Some(alt_text.to_string()),
            link_text: Some(link_text.to_string()),
        }
    }

    /// An assistant that answers only alt-text requests.
    pub fn with_alt_text(alt_text: &str) -> Self {
        Self {
            alt_text: Some(alt_text.to_string()),
            link_text: None,
        }
    }
}

impl Assistant for StubAssistant {
    async fn suggest_alt_text(
        &self,
        _request: &AltTextRequest<'_>,
    ) -> Result<String, AssistantError> {
        self.alt_text
            .clone()
            .ok_or_else(|| AssistantError::Unavailable("stub assistant".to_string()))
    }

    async fn suggest_link_text(
        &self,
        _request: &LinkTextRequest<'_>,
    ) -> Result<String, AssistantError> {
        self.link_text
            .clone()
            .ok_or_else(|| AssistantError::Unavailable("stub assistant".to_string()))
    }
}
