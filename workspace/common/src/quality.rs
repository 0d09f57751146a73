use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Data-quality counters for the selected window (`/reports/data-quality`).
///
/// The endpoint answers either with the counters at the top level or wrapped
/// as `{status, summary: {...}, samples, notes}`. Both shapes deserialize into
/// this struct; the nested `summary` wins when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDataQuality")]
pub struct DataQualityReport {
    pub rows_in_range: u64,
    pub mismatched_total_count: u64,
    pub nonpositive_units_count: u64,
    pub negative_amount_count: u64,
    pub missing_shipping_company_count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct QualityCounts {
    #[serde(default, deserialize_with = "lenient::count")]
    rows_in_range: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    mismatched_total_count: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    nonpositive_units_count: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    negative_amount_count: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    missing_shipping_company_count: u64,
}

#[derive(Debug, Deserialize)]
struct RawDataQuality {
    #[serde(default)]
    summary: Option<QualityCounts>,
    #[serde(flatten)]
    flat: QualityCounts,
}

impl From<RawDataQuality> for DataQualityReport {
    fn from(raw: RawDataQuality) -> Self {
        let counts = raw.summary.unwrap_or(raw.flat);
        Self {
            rows_in_range: counts.rows_in_range,
            mismatched_total_count: counts.mismatched_total_count,
            nonpositive_units_count: counts.nonpositive_units_count,
            negative_amount_count: counts.negative_amount_count,
            missing_shipping_company_count: counts.missing_shipping_company_count,
        }
    }
}

/// Flagged transaction rows for manual inspection (`/reports/data-quality-samples`).
///
/// Rows are read from the first of `samples`, `rows` or `data` that is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSamples")]
pub struct DataQualitySamples {
    pub samples: Vec<DataQualitySample>,
}

#[derive(Debug, Deserialize)]
struct RawSamples {
    #[serde(default)]
    samples: Option<Vec<DataQualitySample>>,
    #[serde(default)]
    rows: Option<Vec<DataQualitySample>>,
    #[serde(default)]
    data: Option<Vec<DataQualitySample>>,
}

impl From<RawSamples> for DataQualitySamples {
    fn from(raw: RawSamples) -> Self {
        let samples = raw.samples.or(raw.rows).or(raw.data).unwrap_or_default();
        Self { samples }
    }
}

/// One flagged sales line. Amounts may be negative when they describe a discrepancy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQualitySample {
    #[serde(default, deserialize_with = "lenient::text")]
    pub sale_time: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sale_date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub seller_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub shipping_company: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub units: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub line_total: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub expected_total: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub diff: Decimal,
}
