use common::DataQualityReport;
use serde::Serialize;
use std::fmt;

use super::orchestrator::ReportSection;

/// Binary data-quality verdict for a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityStatus {
    Ok,
    Warn,
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityStatus::Ok => write!(f, "OK"),
            QualityStatus::Warn => write!(f, "WARN"),
        }
    }
}

/// What the data-quality panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QualityEvaluation {
    Evaluated {
        status: QualityStatus,
        counts: DataQualityReport,
    },
    Unavailable {
        message: String,
    },
}

impl QualityEvaluation {
    pub fn status(&self) -> Option<QualityStatus> {
        match self {
            QualityEvaluation::Evaluated { status, .. } => Some(*status),
            QualityEvaluation::Unavailable { .. } => None,
        }
    }
}

/// WARN when any gating count is non-zero.
///
/// Gating counts are mismatched totals, negative amounts and non-positive
/// units. Missing shipping companies are displayed but never gate.
pub fn status_for(report: &DataQualityReport) -> QualityStatus {
    if report.mismatched_total_count > 0
        || report.negative_amount_count > 0
        || report.nonpositive_units_count > 0
    {
        QualityStatus::Warn
    } else {
        QualityStatus::Ok
    }
}

pub fn evaluate(section: &ReportSection<DataQualityReport>) -> QualityEvaluation {
    match section {
        ReportSection::Ok(report) => QualityEvaluation::Evaluated {
            status: status_for(report),
            counts: *report,
        },
        ReportSection::Err(message) => QualityEvaluation::Unavailable {
            message: message.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(mismatched: u64, negative: u64, nonpositive: u64, missing: u64) -> DataQualityReport {
        DataQualityReport {
            rows_in_range: 100,
            mismatched_total_count: mismatched,
            nonpositive_units_count: nonpositive,
            negative_amount_count: negative,
            missing_shipping_company_count: missing,
        }
    }

    #[test]
    fn test_all_zero_is_ok() {
        assert_eq!(status_for(&counts(0, 0, 0, 0)), QualityStatus::Ok);
    }

    #[test]
    fn test_missing_shipping_alone_is_ok() {
        assert_eq!(status_for(&counts(0, 0, 0, 5)), QualityStatus::Ok);
    }

    #[test]
    fn test_each_gating_count_warns() {
        assert_eq!(status_for(&counts(1, 0, 0, 0)), QualityStatus::Warn);
        assert_eq!(status_for(&counts(0, 1, 0, 0)), QualityStatus::Warn);
        assert_eq!(status_for(&counts(0, 0, 1, 0)), QualityStatus::Warn);
        assert_eq!(status_for(&counts(4, 2, 7, 9)), QualityStatus::Warn);
    }

    #[test]
    fn test_evaluate_ok_section() {
        let evaluation = evaluate(&ReportSection::Ok(counts(0, 0, 0, 3)));
        assert_eq!(
            evaluation,
            QualityEvaluation::Evaluated {
                status: QualityStatus::Ok,
                counts: counts(0, 0, 0, 3),
            }
        );
        assert_eq!(evaluation.status().map(|s| s.to_string()), Some("OK".to_string()));
    }

    #[test]
    fn test_evaluate_error_section_is_unavailable() {
        let evaluation = evaluate(&ReportSection::Err("404 Not Found: nope".to_string()));
        assert_eq!(
            evaluation,
            QualityEvaluation::Unavailable {
                message: "404 Not Found: nope".to_string()
            }
        );
        assert_eq!(evaluation.status(), None);
    }
}
