//! Pipeline conversions module
//!
//! Orchestrates uploads through decoding, estimation and report export.

mod upload_to_report;


pub use upload_to_report::{CoveragePipeline, PipelineOutput, Upload};
