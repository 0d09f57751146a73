//! Per-section dashboard panels.

use common::{
    DataQualitySample, DataQualitySamples, ProductRow, SellerRanking, SellerRow,
    ShippingBreakdown, ShippingRow, TopProducts, WeeklySummary,
};

use super::format::{count, dollars, money, units};
use super::table::{Presentation, escape_html, render};
use crate::report::{QualityEvaluation, QualityStatus, ReportSection};

pub const SELLER_HEADERS: [&str; 4] = ["Seller", "Revenue", "Units", "Lines"];
pub const SHIPPING_HEADERS: [&str; 3] = ["Shipping", "Revenue", "Lines"];
pub const PRODUCT_HEADERS: [&str; 3] = ["Product", "Revenue", "Units"];
pub const SAMPLE_HEADERS: [&str; 10] = [
    "Time", "Date", "Product", "Seller", "Ship", "Unit", "Units", "Total", "Expected", "Diff",
];

pub fn weekly_summary_html(weekly: &WeeklySummary) -> String {
    format!(
        concat!(
            "<div><b>Revenue</b>: {}</div>",
            "<div><b>Units</b>: {}</div>",
            "<div><b>Line count</b>: {}</div>",
            r#"<div class="muted">{} → {}</div>"#,
        ),
        dollars(weekly.revenue),
        units(weekly.units),
        count(weekly.line_count),
        escape_html(&weekly.start_date),
        escape_html(&weekly.end_date),
    )
}

pub fn seller_table(ranking: &SellerRanking) -> Presentation {
    render(&SELLER_HEADERS, Some(ranking.sellers.as_slice()), |r: &SellerRow| {
        vec![
            r.seller_name.clone(),
            dollars(r.revenue),
            units(r.units),
            count(r.line_count),
        ]
    })
}

pub fn shipping_table(breakdown: &ShippingBreakdown) -> Presentation {
    render(
        &SHIPPING_HEADERS,
        Some(breakdown.shipping_companies.as_slice()),
        |r: &ShippingRow| vec![r.shipping_company.clone(), dollars(r.revenue), count(r.line_count)],
    )
}

pub fn product_table(products: &TopProducts) -> Presentation {
    render(&PRODUCT_HEADERS, Some(products.top_products.as_slice()), |r: &ProductRow| {
        vec![r.product_code.clone(), dollars(r.revenue), units(r.units)]
    })
}

pub fn quality_summary_html(evaluation: &QualityEvaluation) -> String {
    match evaluation {
        QualityEvaluation::Evaluated { status, counts } => {
            let class = match status {
                QualityStatus::Ok => "ok",
                QualityStatus::Warn => "bad",
            };
            format!(
                concat!(
                    r#"<div>Status: <span class="{}">{}</span></div>"#,
                    "<div><b>Rows</b>: {}</div>",
                    "<div><b>Mismatched totals</b>: {}</div>",
                    "<div><b>Non-positive units</b>: {}</div>",
                    "<div><b>Negative amounts</b>: {}</div>",
                    "<div><b>Missing shipping</b>: {}</div>",
                ),
                class,
                status,
                count(counts.rows_in_range),
                count(counts.mismatched_total_count),
                count(counts.nonpositive_units_count),
                count(counts.negative_amount_count),
                count(counts.missing_shipping_company_count),
            )
        }
        QualityEvaluation::Unavailable { message } => unavailable_html("DQ endpoint error", message),
    }
}

pub fn sample_table(samples: &DataQualitySamples) -> Presentation {
    render(&SAMPLE_HEADERS, Some(samples.samples.as_slice()), |r: &DataQualitySample| {
        vec![
            r.sale_time.clone(),
            r.sale_date.clone(),
            r.product_code.clone(),
            r.seller_name.clone(),
            r.shipping_company.clone(),
            money(r.unit_price),
            units(r.units),
            money(r.line_total),
            money(r.expected_total),
            money(r.diff),
        ]
    })
}

pub fn samples_html(section: &ReportSection<DataQualitySamples>) -> String {
    match section {
        ReportSection::Ok(samples) => sample_table(samples).to_html(),
        ReportSection::Err(message) => {
            unavailable_html("DQ samples endpoint not available", message)
        }
    }
}

fn unavailable_html(title: &str, message: &str) -> String {
    format!(
        r#"<div class="bad">{}</div><div class="muted">{}</div>"#,
        title,
        escape_html(message)
    )
}
