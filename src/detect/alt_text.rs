//! Alternative-text checks for images.
//!
//! Missing alt text is a hard barrier for screen-reader users; generic alt
//! text ("image", "photo") is barely better. An explicitly empty alt value
//! marks a decorative image and is correct per WCAG, so it is never flagged.

use crate::model::{truncate, Element, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 0;

/// Generic tokens that disqualify alt text.
const GENERIC_ALT_TERMS: &[&str] = &["image", "picture", "photo", "graphic", "screenshot", "img"];

/// Prefixes that waste the reader's time; screen readers already announce
/// the element as an image.
const REDUNDANT_PREFIXES: &[&str] = &["image of ", "picture of ", "photo of ", "graphic of "];

/// Minimum character count for alt text to be considered descriptive.
pub const MIN_ALT_LEN: usize = 5;

/// Whether a non-empty alt text fails the quality bar. Shared with the
/// remediation planner, which applies the same bar to generated text.
pub fn is_generic_alt(alt: &str) -> bool {
    let normalized = alt.trim().to_lowercase();
    if normalized.chars().count() < MIN_ALT_LEN {
        return true;
    }
    if GENERIC_ALT_TERMS.contains(&normalized.as_str()) {
        return true;
    }
    REDUNDANT_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix) && normalized.len() <= prefix.len() + MIN_ALT_LEN)
}

/// Scan a page's images for missing or generic alt text.
pub fn detect_alt_text(page: &Page) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (position, element) in page.elements.iter().enumerate() {
        let image = match element {
            Element::Image(image) => image,
            _ => continue,
        };
        let element_ref = match page.element_ref(position) {
            Some(r) => r,
            None => continue,
        };

        match image.alt_text.as_deref() {
            // Explicitly decorative: correct as-is.
            Some("") => {}
            None => findings.push(Finding {
                kind: IssueKind::MissingAltText,
                severity: Severity::High,
                page: page.number,
                element: element_ref,
                position,
                rank: RANK,
                description: format!("Image {} missing alternative text", element_ref.index),
                current_state: "No alt attribute".to_string(),
                suggestions: Vec::new(),
            }),
            Some(alt) if alt.trim().is_empty() || is_generic_alt(alt) => {
                let shown = truncate(alt.trim(), 50);
                findings.push(Finding {
                    kind: IssueKind::PoorAltText,
                    severity: Severity::Medium,
                    page: page.number,
                    element: element_ref,
                    position,
                    rank: RANK,
                    description: format!(
                        "Image {} has poor quality alt text: '{}'",
                        element_ref.index, shown
                    ),
                    current_state: format!("Alt text: '{}'", shown),
                    suggestions: Vec::new(),
                });
            }
            Some(_) => {}
        }
    }

    findings
}
