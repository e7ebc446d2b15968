//! Score report types and output formatting

pub mod formatter;
pub mod report;
