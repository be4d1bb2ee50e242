//! All-caps text detection.
//!
//! Long runs of capital letters are slower to read and screen readers may
//! spell them out letter by letter. Short strings are left alone so
//! acronyms do not trip the check. Offending blocks on a page aggregate
//! into a single finding, anchored at the first one.

use crate::model::{truncate, Element, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 4;

/// Whether a text block is written entirely in capitals. The length floor
/// is applied to the trimmed text; letters are checked after removing
/// everything else.
pub fn is_all_caps(text: &str, min_chars: usize) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() <= min_chars {
        return false;
    }
    let mut has_letters = false;
    for c in trimmed.chars().filter(|c| c.is_alphabetic()) {
        has_letters = true;
        if c.is_lowercase() {
            return false;
        }
    }
    has_letters
}

/// Scan a page for all-caps text blocks, producing at most one finding.
pub fn detect_all_caps(page: &Page, min_chars: usize) -> Vec<Finding> {
    let mut offending: Vec<(usize, &str)> = Vec::new();

    for (position, element) in page.elements.iter().enumerate() {
        if let Element::TextBlock(block) = element {
            if is_all_caps(&block.text, min_chars) {
                offending.push((position, block.text.trim()));
            }
        }
    }

    let (first_position, _) = match offending.first() {
        Some(&first) => first,
        None => return Vec::new(),
    };
    let element_ref = match page.element_ref(first_position) {
        Some(r) => r,
        None => return Vec::new(),
    };

    let examples: Vec<String> = offending
        .iter()
        .take(3)
        .map(|(_, text)| format!("'{}'", truncate(text, 50)))
        .collect();

    vec![Finding {
        kind: IssueKind::AllCapsText,
        severity: Severity::Medium,
        page: page.number,
        element: element_ref,
        position: first_position,
        rank: RANK,
        description: format!(
            "{} text block{} in all capital letters",
            offending.len(),
            if offending.len() == 1 { "" } else { "s" }
        ),
        current_state: examples.join(", "),
        suggestions: Vec::new(),
    }]
}
