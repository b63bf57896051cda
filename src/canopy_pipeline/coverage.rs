//! Coverage estimation module
//!
//! Counts canopy pixels in segmentation masks, converts them to cm² and
//! aggregates batches into a report.

mod config;
mod estimator;
pub mod types;


pub use config::{CoverageConfig, CoverageConfigBuilder, DEFAULT_SIZE_LIMIT_BYTES};
pub use estimator::{CoverageEstimator, Measurement, estimate_batch, estimate_one, to_area};
pub use types::{
    CalibrationFactor, CoverageReport, CoverageResult, DEFAULT_PIXELS_PER_CM2, LabeledImage,
    RejectReason, RejectedInput,
};
