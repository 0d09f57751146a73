//! Plain-text weekly digest, ready to paste into a chat message.

use crate::report::{AggregatedReport, QualityEvaluation};

use super::format::{count, dollars, units};

/// Short summary: totals, top seller and top product.
///
/// Sellers and products are listed by the endpoints in revenue order, so the
/// first row of each is the top one.
pub fn weekly_digest(report: &AggregatedReport, quality: Option<&QualityEvaluation>) -> String {
    let weekly = &report.weekly;
    let mut out = format!("Weekly Sales Report ({} ~ {})\n", weekly.start_date, weekly.end_date);
    out.push_str(&format!("- Total Revenue: {}\n", dollars(weekly.revenue)));
    out.push_str(&format!("- Total Units: {}\n", units(weekly.units)));
    out.push_str(&format!("- Line Items: {}\n", count(weekly.line_count)));

    if let Some(seller) = report.sellers.sellers.first() {
        out.push_str(&format!(
            "- Top Seller: {}  Revenue {}\n",
            seller.seller_name,
            dollars(seller.revenue)
        ));
    }
    if let Some(product) = report.top_products.top_products.first() {
        out.push_str(&format!(
            "- Top Product: {}  Revenue {} (Units {})\n",
            product.product_code,
            dollars(product.revenue),
            units(product.units)
        ));
    }

    match quality {
        Some(QualityEvaluation::Evaluated { status, .. }) => {
            out.push_str(&format!("- Data Quality: {}\n", status));
        }
        Some(QualityEvaluation::Unavailable { message }) => {
            out.push_str(&format!("- Data Quality: unavailable ({})\n", message));
        }
        None => {}
    }

    out
}
