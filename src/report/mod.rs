// src/report/mod.rs
pub mod models;
pub mod summary;

pub use models::ExtractionResult;
pub use summary::ReportSummary;
