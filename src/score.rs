//! Accessibility scoring.
//!
//! A page starts at 100 and loses a fixed penalty per counting issue,
//! scaled by severity and floored at 0. Substantively auto-fixed issues do
//! not count; placeholder fixes and manual-review items do, since the
//! underlying problem is still there.
//!
//! The document score is the element-count-weighted average of page
//! scores: a dense page with problems drags the document down more than a
//! sparse one. This is the single aggregation rule used everywhere.

use crate::detect::{Issue, Severity};

/// Score deduction per issue, by severity.
pub mod points {
    pub const CRITICAL: i32 = 25;
    pub const HIGH: i32 = 15;
    pub const MEDIUM: i32 = 10;
    pub const LOW: i32 = 5;
}

/// Penalty for one issue.
pub fn penalty(severity: Severity) -> i32 {
    match severity {
        Severity::Critical => points::CRITICAL,
        Severity::High => points::HIGH,
        Severity::Medium => points::MEDIUM,
        Severity::Low => points::LOW,
    }
}

/// Whether an issue still counts against the score.
pub fn counts_against_score(issue: &Issue) -> bool {
    !issue.status.is_resolved()
}

/// Score for one page given its issues. Always in [0, 100].
pub fn page_score<'a, I>(issues: I) -> i32
where
    I: IntoIterator<Item = &'a Issue>,
{
    let deduction: i32 = issues
        .into_iter()
        .filter(|issue| counts_against_score(issue))
        .map(|issue| penalty(issue.severity))
        .sum();
    (100 - deduction).clamp(0, 100)
}

/// Document score: page scores weighted by analyzed element counts, floor
/// division. Pages with no elements carry no weight; an empty document
/// scores 100.
pub fn document_score(pages: &[(i32, usize)]) -> i32 {
    let total_elements: usize = pages.iter().map(|(_, elements)| elements).sum();
    if total_elements == 0 {
        return 100;
    }
    let weighted_sum: i64 = pages
        .iter()
        .map(|&(score, elements)| score as i64 * elements as i64)
        .sum();
    (weighted_sum / total_elements as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{IssueKind, IssueStatus, Priority};
    use crate::model::{ElementKind, ElementRef};

    fn issue(severity: Severity, status: IssueStatus) -> Issue {
        Issue {
            kind: IssueKind::MissingAltText,
            severity,
            page: 1,
            element: ElementRef {
                page: 1,
                kind: ElementKind::Image,
                index: 1,
            },
            description: "test".to_string(),
            current_state: "test".to_string(),
            required_action: "test",
            wcag_criterion: "1.1.1",
            priority: Priority::MustFix,
            estimated_time: "2-5 minutes",
            suggestions: Vec::new(),
            status,
        }
    }

    #[test]
    fn test_clean_page_scores_100() {
        let no_issues: Vec<Issue> = Vec::new();
        assert_eq!(page_score(&no_issues), 100);
    }

    #[test]
    fn test_penalties_subtract_by_severity() {
        let issues = vec![
            issue(Severity::High, IssueStatus::Open),
            issue(Severity::Medium, IssueStatus::ManualReview),
        ];
        assert_eq!(page_score(&issues), 75);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let issues: Vec<Issue> = (0..6)
            .map(|_| issue(Severity::Critical, IssueStatus::Open))
            .collect();
        assert_eq!(page_score(&issues), 0);
    }

    #[test]
    fn test_resolved_issues_do_not_count() {
        let issues = vec![
            issue(Severity::High, IssueStatus::AutoFixed),
            issue(Severity::Medium, IssueStatus::AutoFixed),
        ];
        assert_eq!(page_score(&issues), 100);
    }

    #[test]
    fn test_placeholder_fixed_still_counts() {
        let issues = vec![issue(Severity::High, IssueStatus::PlaceholderFixed)];
        assert_eq!(page_score(&issues), 85);
    }

    #[test]
    fn test_document_score_weights_by_elements() {
        // A heavy page at 60 and a light page at 100.
        let pages = vec![(60, 8), (100, 2)];
        assert_eq!(document_score(&pages), 68);
        // Equal weights reduce to the arithmetic mean.
        let pages = vec![(60, 5), (100, 5)];
        assert_eq!(document_score(&pages), 80);
    }

    #[test]
    fn test_empty_document_scores_100() {
        assert_eq!(document_score(&[]), 100);
        assert_eq!(document_score(&[(40, 0)]), 100);
    }

    #[test]
    fn test_document_score_in_range() {
        let pages = vec![(0, 3), (100, 7)];
        let score = document_score(&pages);
        assert!((0..=100).contains(&score));
        assert_eq!(score, 70);
    }
}
