//! Input processing module
//! Reads plain-text and Markdown documents for the CLI

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
