// src/extractors/mod.rs
pub mod aggregate;
pub mod lines;
pub mod section;

// Re-export key extraction types for convenience
pub use aggregate::aggregate;
pub use section::{HeaderLine, SectionSpec, ALL_SECTIONS};
