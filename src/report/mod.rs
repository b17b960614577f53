//! CSV reports
//!
//! One file per run joining the price snapshot with every scored text,
//! plus a trailing summary row.

mod retention;
mod writer;

pub use retention::cleanup_old_reports;
pub use writer::{CsvReportWriter, REPORT_COLUMNS};
