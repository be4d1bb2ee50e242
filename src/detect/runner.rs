//! Detection runner that orchestrates all checks.
//!
//! Detectors are read-only over the document model, so pages fan out across
//! rayon workers. The one exception is heading-hierarchy state, which is
//! threaded sequentially in page order after the parallel pass. Within a
//! page, findings are ordered by element position, then by the fixed
//! detector order, so identical input always yields identical output.

use rayon::prelude::*;

use crate::config::DetectionConfig;
use crate::model::Document;

use super::{
    detect_all_caps, detect_alt_text, detect_contrast, detect_link_text, detect_small_fonts,
    detect_table_headers, DetectionResult, Finding, HeadingTracker,
};

/// Executes every detector against a document.
pub struct Runner {
    config: DetectionConfig,
}

impl Runner {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Run all detectors. Never mutates the document.
    pub fn run(&self, document: &Document) -> DetectionResult {
        let warnings = document.validate();

        let mut per_page: Vec<Vec<Finding>> = document
            .pages
            .par_iter()
            .map(|page| {
                let mut findings = Vec::new();
                findings.extend(detect_alt_text(page));
                findings.extend(detect_link_text(page, self.config.max_suggestions));
                findings.extend(detect_contrast(page));
                findings.extend(detect_all_caps(page, self.config.all_caps_min_chars));
                findings.extend(detect_small_fonts(
                    page,
                    self.config.min_font_pt,
                    self.config.severe_font_pt,
                ));
                findings.extend(detect_table_headers(page));
                findings
            })
            .collect();

        // Heading state is the only cross-detector ordering constraint:
        // pages must be visited strictly in order.
        let mut tracker = HeadingTracker::new();
        for (index, page) in document.pages.iter().enumerate() {
            per_page[index].extend(tracker.scan_page(page));
        }

        let mut findings = Vec::new();
        for mut page_findings in per_page {
            page_findings.sort_by_key(|f| (f.position, f.rank));
            findings.extend(page_findings);
        }

        DetectionResult { findings, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::IssueKind;
    use crate::model::{Element, Heading, Image, Link, Page, TextBlock};

    fn test_document() -> Document {
        Document {
            name: "deck.pptx".to_string(),
            pages: vec![Page {
                number: 1,
                title: Some("Intro".to_string()),
                elements: vec![
                    Element::Heading(Heading {
                        level: 1,
                        text: "Intro".to_string(),
                    }),
                    Element::Image(Image {
                        source: Some("media/chart.png".to_string()),
                        alt_text: None,
                    }),
                    Element::Heading(Heading {
                        level: 3,
                        text: "Details".to_string(),
                    }),
                    Element::Link(Link {
                        text: "click here".to_string(),
                        target: "https://example.edu/syllabus.pdf".to_string(),
                    }),
                    Element::TextBlock(TextBlock {
                        text: "ALL CAPS ANNOUNCEMENT TEXT".to_string(),
                        font_size_pt: Some(10.0),
                        bold: false,
                        foreground: None,
                        background: None,
                    }),
                ],
            }],
        }
    }

    fn run_default(document: &Document) -> DetectionResult {
        Runner::new(DetectionConfig::default()).run(document)
    }

    #[test]
    fn test_findings_in_element_order() {
        let result = run_default(&test_document());
        let kinds: Vec<IssueKind> = result.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MissingAltText,   // image at position 1
                IssueKind::HeadingHierarchy, // heading at position 2
                IssueKind::VagueLinkText,    // link at position 3
                IssueKind::AllCapsText,      // text at position 4
                IssueKind::SmallFont,        // same element, caps rank first
            ]
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let document = test_document();
        let a = run_default(&document);
        let b = run_default(&document);
        assert_eq!(a.findings.len(), b.findings.len());
        for (x, y) in a.findings.iter().zip(b.findings.iter()) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.element, y.element);
            assert_eq!(x.description, y.description);
        }
    }

    #[test]
    fn test_warnings_carried_through() {
        let mut document = test_document();
        document.pages[0].elements.push(Element::Link(Link {
            text: "somewhere".to_string(),
            target: "".to_string(),
        }));
        let result = run_default(&document);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("empty target"));
    }

    #[test]
    fn test_heading_state_threads_across_pages_in_order() {
        let mut document = test_document();
        document.pages.push(Page {
            number: 2,
            title: None,
            elements: vec![Element::Heading(Heading {
                level: 2,
                text: "Continued".to_string(),
            })],
        });
        let result = run_default(&document);
        let gaps: Vec<&Finding> = result
            .findings
            .iter()
            .filter(|f| f.kind == IssueKind::HeadingHierarchy)
            .collect();
        // One on page 1 (h1 -> h3) and one on page 2 (baseline -> h2).
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].page, 1);
        assert_eq!(gaps[1].page, 2);
    }
}
