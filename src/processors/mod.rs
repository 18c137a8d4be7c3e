pub mod converter;
pub mod extraction_report;

pub use converter::{ConversionSummary, Converter};
pub use extraction_report::{ExtractionReport, SkipReason};
