//! Aggregates transactions into totals, a monthly trend and category rankings,
//! and serves them as a page and as JSON.

mod aggregation;
mod api;
mod page;
mod report;

pub use aggregation::{SummaryTotals, compute_summary_totals};
pub use api::get_analytics_report;
pub use page::get_analytics_page;
pub use report::AnalyticsReport;
