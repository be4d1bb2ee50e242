//! Core types for accessibility findings.

use serde::{Deserialize, Serialize};

use crate::model::{AnalysisWarning, ElementRef};

/// Severity tiers for accessibility issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Remediation priority labels, derived from severity by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Must Fix")]
    MustFix,
    #[serde(rename = "Should Fix")]
    ShouldFix,
    #[serde(rename = "Could Fix")]
    CouldFix,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::MustFix => "Must Fix",
            Priority::ShouldFix => "Should Fix",
            Priority::CouldFix => "Could Fix",
        }
    }

    /// Sort rank: Must Fix first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::MustFix => 0,
            Priority::ShouldFix => 1,
            Priority::CouldFix => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kinds of accessibility issues the detectors produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "missing_alt_text")]
    MissingAltText,
    #[serde(rename = "poor_alt_text")]
    PoorAltText,
    #[serde(rename = "vague_link_text")]
    VagueLinkText,
    #[serde(rename = "heading_hierarchy")]
    HeadingHierarchy,
    #[serde(rename = "low_contrast")]
    LowContrast,
    #[serde(rename = "all_caps_text")]
    AllCapsText,
    #[serde(rename = "small_font")]
    SmallFont,
    #[serde(rename = "missing_table_headers")]
    MissingTableHeaders,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingAltText => "missing_alt_text",
            IssueKind::PoorAltText => "poor_alt_text",
            IssueKind::VagueLinkText => "vague_link_text",
            IssueKind::HeadingHierarchy => "heading_hierarchy",
            IssueKind::LowContrast => "low_contrast",
            IssueKind::AllCapsText => "all_caps_text",
            IssueKind::SmallFont => "small_font",
            IssueKind::MissingTableHeaders => "missing_table_headers",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "missing_alt_text" => Some(IssueKind::MissingAltText),
            "poor_alt_text" => Some(IssueKind::PoorAltText),
            "vague_link_text" => Some(IssueKind::VagueLinkText),
            "heading_hierarchy" => Some(IssueKind::HeadingHierarchy),
            "low_contrast" => Some(IssueKind::LowContrast),
            "all_caps_text" => Some(IssueKind::AllCapsText),
            "small_font" => Some(IssueKind::SmallFont),
            "missing_table_headers" => Some(IssueKind::MissingTableHeaders),
            _ => None,
        }
    }

    /// Human-readable label, e.g. "Missing Alt Text".
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of an issue. Transitions at most once, away from `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Detected, not yet considered by the planner.
    Open,
    /// Substantively fixed by the planner.
    AutoFixed,
    /// Fixed with a minimal placeholder; still needs human attention.
    PlaceholderFixed,
    /// The planner declined to fix automatically.
    ManualReview,
}

impl IssueStatus {
    /// Whether the underlying problem is actually solved. Placeholder fixes
    /// keep the issue alive for scoring and the manual worklist.
    pub fn is_resolved(&self) -> bool {
        matches!(self, IssueStatus::AutoFixed)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Open => write!(f, "Open"),
            IssueStatus::AutoFixed => write!(f, "Auto-Fixed"),
            IssueStatus::PlaceholderFixed => write!(f, "Auto-Fixed (placeholder)"),
            IssueStatus::ManualReview => write!(f, "Manual Review Required"),
        }
    }
}

/// Raw detector output, before the classifier attaches remediation
/// metadata.
#[derive(Debug, Clone)]
pub struct Finding {
    pub kind: IssueKind,
    pub severity: Severity,
    pub page: usize,
    pub element: ElementRef,
    /// Index of the element in the page's element list, for ordering.
    pub position: usize,
    /// Rank of the detector that produced this finding, for ordering ties.
    pub rank: u8,
    pub description: String,
    pub current_state: String,
    /// Replacement candidates, populated by the link detector.
    pub suggestions: Vec<String>,
}

/// A classified accessibility issue. Immutable after classification except
/// for `status`, which the remediation planner updates exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub page: usize,
    pub element: ElementRef,
    pub description: String,
    pub current_state: String,
    pub required_action: &'static str,
    pub wcag_criterion: &'static str,
    pub priority: Priority,
    pub estimated_time: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    pub status: IssueStatus,
}

/// Output of a detection pass over one document.
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    pub findings: Vec<Finding>,
    pub warnings: Vec<AnalysisWarning>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: DetectionResult) {
        self.findings.extend(other.findings);
        self.warnings.extend(other.warnings);
    }
}
