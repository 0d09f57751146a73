//! Transport types mirroring the report endpoints' JSON payloads.
//!
//! Every payload is deserialized through the default-filling helpers in
//! [`lenient`], so downstream code always sees typed, fully populated records
//! no matter how sparse the endpoint's answer was.

pub mod lenient;
mod quality;
mod sales;

pub use quality::{DataQualityReport, DataQualitySample, DataQualitySamples};
pub use sales::{
    ProductRow, SellerRanking, SellerRow, ShippingBreakdown, ShippingRow, TopProducts,
    WeeklySummary,
};
