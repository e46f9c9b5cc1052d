// src/lib.rs
//! Turns the plain-text social-network analytics report into a structured
//! [`ExtractionResult`] snapshot.

pub mod extractors;
pub mod report;
pub mod runner;
pub mod storage;
pub mod utils;

pub use extractors::aggregate;
pub use report::{ExtractionResult, ReportSummary};
