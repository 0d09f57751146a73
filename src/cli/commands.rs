pub mod report;
pub mod serve;

pub use report::{ReportOptions, report};
pub use serve::serve;
