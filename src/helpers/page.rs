//! Server-rendered dashboard page.

use super::panels;
use super::table::escape_html;
use crate::controller::DashboardView;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:24px;color:#222}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(360px,1fr));gap:16px}\
.card{border:1px solid #ddd;border-radius:8px;padding:12px 16px}\
.card h2{font-size:1.05rem;margin:0 0 8px}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #eee;padding:4px 8px;text-align:left}\
.muted{color:#777}.bad{color:#b00020}.ok{color:#1b7f3b}";

/// Placeholder for panels before the first successful load.
const NOT_LOADED_HTML: &str = r#"<div class="muted">Not loaded</div>"#;

/// Render the whole page for the current dashboard view.
pub fn render_page(view: &DashboardView) -> String {
    // poll until the running load settles
    let refresh = if view.status.is_loading() {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };
    let status_class = if view.status.is_error() { "bad" } else { "muted" };
    let disabled = if view.status.trigger_enabled() { "" } else { " disabled" };

    let (weekly, sellers, shipping, products, quality, samples) = match &view.report {
        Some(report) => (
            panels::weekly_summary_html(&report.weekly),
            panels::seller_table(&report.sellers).to_html(),
            panels::shipping_table(&report.shipping).to_html(),
            panels::product_table(&report.top_products).to_html(),
            view.quality
                .as_ref()
                .map(panels::quality_summary_html)
                .unwrap_or_else(|| NOT_LOADED_HTML.to_string()),
            panels::samples_html(&report.data_quality_samples),
        ),
        None => {
            let empty = || NOT_LOADED_HTML.to_string();
            (empty(), empty(), empty(), empty(), empty(), empty())
        }
    };

    let inputs = &view.inputs;
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
{refresh}
<title>Sales Dashboard</title>
<style>{style}</style>
</head>
<body>
<h1>Sales Dashboard</h1>
<form method="post" action="/load">
<label>Start <input type="date" id="startDate" name="start_date" value="{start}"></label>
<label>End <input type="date" id="endDate" name="end_date" value="{end}"></label>
<label>Top N <input type="number" id="limit" name="limit" value="{limit}"></label>
<label>Tolerance <input type="number" step="any" id="tol" name="tol" value="{tol}"></label>
<button type="submit" id="loadBtn"{disabled}>Load</button>
</form>
<p id="status" class="{status_class}">{status}</p>
<div class="grid">
<div class="card"><h2>Weekly summary</h2><div id="weeklySummary">{weekly}</div></div>
<div class="card"><h2>Data quality</h2><div id="dqSummary">{quality}</div></div>
<div class="card"><h2>Seller ranking</h2><div id="sellerTable">{sellers}</div></div>
<div class="card"><h2>Shipping breakdown</h2><div id="shipTable">{shipping}</div></div>
<div class="card"><h2>Top products</h2><div id="productTable">{products}</div></div>
</div>
<div class="card"><h2>Data quality samples</h2><div id="dqSamples">{samples}</div></div>
</body>
</html>
"#,
        refresh = refresh,
        style = STYLE,
        start = escape_html(&inputs.start_date),
        end = escape_html(&inputs.end_date),
        limit = escape_html(&inputs.limit),
        tol = escape_html(&inputs.tol),
        disabled = disabled,
        status_class = status_class,
        status = escape_html(view.status.text()),
        weekly = weekly,
        quality = quality,
        sellers = sellers,
        shipping = shipping,
        products = products,
        samples = samples,
    )
}
