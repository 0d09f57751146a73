use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Totals for the selected window (`/reports/weekly-summary`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub revenue: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub units: Decimal,
    #[serde(default, deserialize_with = "lenient::count")]
    pub line_count: u64,
}

/// Revenue ranking by seller (`/reports/seller-ranking`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerRanking {
    #[serde(default, deserialize_with = "lenient::list")]
    pub sellers: Vec<SellerRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub seller_name: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub revenue: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub units: Decimal,
    #[serde(default, deserialize_with = "lenient::count")]
    pub line_count: u64,
}

/// Best selling products by revenue (`/reports/top-products`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProducts {
    #[serde(default, deserialize_with = "lenient::list")]
    pub top_products: Vec<ProductRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_code: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub revenue: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub units: Decimal,
}

/// Revenue split by shipping company (`/reports/shipping-breakdown`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingBreakdown {
    #[serde(default, deserialize_with = "lenient::list")]
    pub shipping_companies: Vec<ShippingRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub shipping_company: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub revenue: Decimal,
    #[serde(default, deserialize_with = "lenient::count")]
    pub line_count: u64,
}
