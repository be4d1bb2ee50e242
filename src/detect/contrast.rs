//! Color-contrast checks for text blocks.
//!
//! Drives the pure evaluator in [`crate::contrast`]. Blocks whose colors
//! cannot be resolved (inherited or unknown) are skipped, not flagged.

use crate::contrast::{contrast_ratio, evaluate, is_large_text, required_ratio, ContrastLevel};
use crate::model::{truncate, Element, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 3;

/// Scan a page's text blocks for insufficient contrast.
pub fn detect_contrast(page: &Page) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (position, element) in page.elements.iter().enumerate() {
        let block = match element {
            Element::TextBlock(block) => block,
            _ => continue,
        };
        let (foreground, background) = match (block.foreground, block.background) {
            (Some(fg), Some(bg)) => (fg, bg),
            _ => continue,
        };

        let large = is_large_text(block.font_size_pt, block.bold);
        let ratio = contrast_ratio(foreground, background);
        let severity = match evaluate(ratio, large) {
            ContrastLevel::Pass => continue,
            ContrastLevel::Borderline => Severity::Medium,
            ContrastLevel::Fail => Severity::High,
        };
        let element_ref = match page.element_ref(position) {
            Some(r) => r,
            None => continue,
        };

        findings.push(Finding {
            kind: IssueKind::LowContrast,
            severity,
            page: page.number,
            element: element_ref,
            position,
            rank: RANK,
            description: format!(
                "Text contrast ratio {}:1 is below the {}:1 minimum",
                ratio,
                required_ratio(large)
            ),
            current_state: format!(
                "{} on {} at '{}'",
                foreground,
                background,
                truncate(block.text.trim(), 50)
            ),
            suggestions: Vec::new(),
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rgb, TextBlock};

    fn block(fg: Option<&str>, bg: Option<&str>, size: Option<f32>, bold: bool) -> Element {
        Element::TextBlock(TextBlock {
            text: "Sample text".to_string(),
            font_size_pt: size,
            bold,
            foreground: fg.and_then(Rgb::from_hex),
            background: bg.and_then(Rgb::from_hex),
        })
    }

    fn page(elements: Vec<Element>) -> Page {
        Page {
            number: 1,
            title: None,
            elements,
        }
    }

    #[test]
    fn test_black_on_white_passes() {
        let p = page(vec![block(Some("#000000"), Some("#ffffff"), Some(12.0), false)]);
        assert!(detect_contrast(&p).is_empty());
    }

    #[test]
    fn test_light_gray_on_white_fails_high() {
        let p = page(vec![block(Some("#cccccc"), Some("#ffffff"), Some(12.0), false)]);
        let findings = detect_contrast(&p);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, IssueKind::LowContrast);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn test_borderline_normal_text_flagged_medium() {
        // #949494 on white: between 3:1 and 4.5:1.
        let p = page(vec![block(Some("#949494"), Some("#ffffff"), Some(12.0), false)]);
        let findings = detect_contrast(&p);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn test_borderline_ratio_passes_for_large_text() {
        let p = page(vec![block(Some("#949494"), Some("#ffffff"), Some(24.0), false)]);
        assert!(detect_contrast(&p).is_empty());
    }

    #[test]
    fn test_unresolved_colors_skipped() {
        let p = page(vec![
            block(Some("#cccccc"), None, Some(12.0), false),
            block(None, Some("#ffffff"), Some(12.0), false),
            block(None, None, None, false),
        ]);
        assert!(detect_contrast(&p).is_empty());
    }
}
