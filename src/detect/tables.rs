//! Table structure checks.
//!
//! A data table with no header row gives assistive technology nothing to
//! associate cell values with. Single-row tables are treated as layout and
//! skipped.

use crate::model::{Element, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 6;

/// Scan a page's tables for missing header rows.
pub fn detect_table_headers(page: &Page) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (position, element) in page.elements.iter().enumerate() {
        let table = match element {
            Element::Table(table) => table,
            _ => continue,
        };
        if table.rows <= 1 || table.has_header_row {
            continue;
        }
        let element_ref = match page.element_ref(position) {
            Some(r) => r,
            None => continue,
        };

        findings.push(Finding {
            kind: IssueKind::MissingTableHeaders,
            severity: Severity::Medium,
            page: page.number,
            element: element_ref,
            position,
            rank: RANK,
            description: format!("Table {} is missing a header row", element_ref.index),
            current_state: format!(
                "{} rows x {} columns, no header row",
                table.rows, table.columns
            ),
            suggestions: Vec::new(),
        });
    }

    findings
}
