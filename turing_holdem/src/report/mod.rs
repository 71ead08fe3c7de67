//! Per-session winner reports.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{ReportError, ReportResult};
pub use manager::Reporter;
pub use models::{SessionReport, Tally};
