use std::sync::Arc;

use common::{
    DataQualityReport, DataQualitySamples, SellerRanking, ShippingBreakdown, TopProducts,
    WeeklySummary,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use super::client::{ReportFetcher, fetch};
use super::error::{ReportError, Result};
use super::query::ReportQuery;

/// Report endpoint paths, relative to the report API base URL.
pub mod endpoints {
    pub const WEEKLY_SUMMARY: &str = "/reports/weekly-summary";
    pub const SELLER_RANKING: &str = "/reports/seller-ranking";
    pub const TOP_PRODUCTS: &str = "/reports/top-products";
    pub const SHIPPING_BREAKDOWN: &str = "/reports/shipping-breakdown";
    pub const DATA_QUALITY: &str = "/reports/data-quality";
    pub const DATA_QUALITY_SAMPLES: &str = "/reports/data-quality-samples";
}

/// Outcome of an optional endpoint: its payload, or the message to show in its panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum ReportSection<T> {
    Ok(T),
    Err(String),
}

impl<T> ReportSection<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(payload) => ReportSection::Ok(payload),
            Err(e) => ReportSection::Err(e.display_message()),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            ReportSection::Ok(payload) => Some(payload),
            ReportSection::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReportSection::Ok(_) => None,
            ReportSection::Err(message) => Some(message),
        }
    }
}

/// Everything one successful load produced.
///
/// The four mandatory payloads are always present; the two optional sections
/// carry either their payload or their own error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReport {
    pub weekly: WeeklySummary,
    pub sellers: SellerRanking,
    pub top_products: TopProducts,
    pub shipping: ShippingBreakdown,
    pub data_quality: ReportSection<DataQualityReport>,
    pub data_quality_samples: ReportSection<DataQualitySamples>,
}

/// Issues the full set of report calls for one query.
#[derive(Clone)]
pub struct ReportOrchestrator {
    fetcher: Arc<dyn ReportFetcher>,
}

impl std::fmt::Debug for ReportOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportOrchestrator").finish_non_exhaustive()
    }
}

impl ReportOrchestrator {
    pub fn new(fetcher: Arc<dyn ReportFetcher>) -> Self {
        Self { fetcher }
    }

    /// Load every section for `query`.
    ///
    /// All six calls are dispatched together on the current task. The first
    /// mandatory error ends the load at once and drops the calls still in
    /// flight; optional failures only mark their section.
    #[instrument(skip(self), fields(start = %query.range.start, end = %query.range.end))]
    pub async fn load(&self, query: &ReportQuery) -> Result<AggregatedReport> {
        let fetcher = self.fetcher.as_ref();
        let range = query.range_params();
        let top_products = query.top_products_params();
        let data_quality = query.data_quality_params();
        let samples = query.data_quality_sample_params();

        let mandatory = async {
            let fetched = tokio::try_join!(
                fetch::<WeeklySummary>(fetcher, endpoints::WEEKLY_SUMMARY, &range),
                fetch::<SellerRanking>(fetcher, endpoints::SELLER_RANKING, &range),
                fetch::<TopProducts>(fetcher, endpoints::TOP_PRODUCTS, &top_products),
                fetch::<ShippingBreakdown>(fetcher, endpoints::SHIPPING_BREAKDOWN, &range),
            );
            fetched.inspect_err(|e| {
                error!(error = %e, "Mandatory report failed, aborting load");
            })
        };
        // optional sections never fail, they only ride along until a mandatory error
        let optional = async {
            Ok::<_, ReportError>(tokio::join!(
                optional_section::<DataQualityReport>(fetcher, endpoints::DATA_QUALITY, &data_quality),
                optional_section::<DataQualitySamples>(fetcher, endpoints::DATA_QUALITY_SAMPLES, &samples),
            ))
        };

        let ((weekly, sellers, top_products, shipping), (data_quality, data_quality_samples)) =
            tokio::try_join!(mandatory, optional)?;

        info!(
            sellers = sellers.sellers.len(),
            products = top_products.top_products.len(),
            shipping = shipping.shipping_companies.len(),
            "Report load complete"
        );

        Ok(AggregatedReport {
            weekly,
            sellers,
            top_products,
            shipping,
            data_quality,
            data_quality_samples,
        })
    }
}

async fn optional_section<T>(
    fetcher: &dyn ReportFetcher,
    endpoint: &str,
    params: &[(&'static str, String)],
) -> ReportSection<T>
where
    T: serde::de::DeserializeOwned,
{
    let result: Result<T> = fetch(fetcher, endpoint, params).await;
    if let Err(ref e) = result {
        warn!(%endpoint, error = %e, "Optional report unavailable");
    }
    ReportSection::from_result(result)
}
