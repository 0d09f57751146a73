//! Report retrieval and evaluation: query construction, the HTTP client,
//! multi-endpoint orchestration and the data-quality rule.

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod quality;
pub mod query;

pub use client::{HttpReportClient, ReportFetcher};
pub use error::ReportError;
pub use orchestrator::{AggregatedReport, ReportOrchestrator, ReportSection};
pub use quality::{QualityEvaluation, QualityStatus};
pub use query::{ReportQuery, build_query};
