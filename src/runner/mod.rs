// src/runner/mod.rs
pub mod program;

pub use program::{analyze, ReportProgram};
