use serde::Serialize;
use tracing::debug;

use super::error::{ReportError, Result};

/// Top-products limit used when the input is empty, zero or not a number.
pub const DEFAULT_LIMIT: f64 = 12.0;
/// Mismatch tolerance (in currency units) used when the input is empty, zero or not a number.
pub const DEFAULT_TOLERANCE: f64 = 0.05;
/// Upper bound for the number of data-quality sample rows requested.
pub const SAMPLE_LIMIT_CAP: f64 = 50.0;

/// Query string parameters for one endpoint call, in request order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Inclusive reporting window, as entered by the operator (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Validated query shared by every endpoint call of one load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportQuery {
    pub range: DateRange,
    pub limit: f64,
    pub tolerance: f64,
}

/// Build a [`ReportQuery`] from raw input values.
///
/// Only the date bounds are validated. Limit and tolerance follow numeric
/// coercion: anything that coerces to NaN or zero falls back to the default.
/// Date format is not checked here; the endpoints reject bad dates.
pub fn build_query(
    start_raw: Option<&str>,
    end_raw: Option<&str>,
    limit_raw: Option<&str>,
    tol_raw: Option<&str>,
) -> Result<ReportQuery> {
    let start = non_empty(start_raw);
    let end = non_empty(end_raw);

    let (Some(start), Some(end)) = (start, end) else {
        debug!(?start_raw, ?end_raw, "Rejecting query without date bounds");
        return Err(ReportError::Validation("missing date bounds".to_string()));
    };

    let query = ReportQuery {
        range: DateRange {
            start: start.to_string(),
            end: end.to_string(),
        },
        limit: coerce_number(limit_raw, DEFAULT_LIMIT),
        tolerance: coerce_number(tol_raw, DEFAULT_TOLERANCE),
    };
    debug!(?query, "Built report query");

    Ok(query)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Browser-style numeric coercion; NaN and zero fall back to `default`.
fn coerce_number(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(parse_number)
        .filter(|n| *n != 0.0)
        .unwrap_or(default)
}

/// Parse like `Number(text)`: decimal or exponent notation, `0x`/`0o`/`0b`
/// integers and signed `Infinity`. `None` stands for NaN; empty text is 0.
fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    // Rust also accepts "inf" and "nan" spellings, the browser does not
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Query string form of a coerced number, `Infinity` spelled out.
fn number_param(value: f64) -> String {
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}Infinity", sign)
    } else {
        value.to_string()
    }
}

impl ReportQuery {
    /// Number of sample rows requested from the data-quality samples endpoint.
    pub fn sample_limit(&self) -> f64 {
        self.limit.min(SAMPLE_LIMIT_CAP)
    }

    /// Parameters for weekly-summary, seller-ranking and shipping-breakdown.
    pub fn range_params(&self) -> QueryParams {
        vec![
            ("start_date", self.range.start.clone()),
            ("end_date", self.range.end.clone()),
        ]
    }

    pub fn top_products_params(&self) -> QueryParams {
        let mut params = self.range_params();
        params.push(("limit", number_param(self.limit)));
        params
    }

    pub fn data_quality_params(&self) -> QueryParams {
        let mut params = self.range_params();
        params.push(("tol", number_param(self.tolerance)));
        params
    }

    pub fn data_quality_sample_params(&self) -> QueryParams {
        let mut params = self.data_quality_params();
        params.push(("limit", number_param(self.sample_limit())));
        params
    }
}
