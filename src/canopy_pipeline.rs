//! Canopy coverage pipeline module
//!
//! This module provides a structured approach to canopy estimation, with
//! separate modules for image decoding, HSV segmentation, coverage
//! estimation, report export and upload orchestration.

pub mod common;
pub mod decode;
pub mod segmentation;
pub mod coverage;
pub mod export;
pub mod conversions;

pub use common::{
    CanopyError,
    Result,
};

pub use decode::{
    ImageDecoder,
    PlantImage,
    StandardImageDecoder,
};

pub use segmentation::{
    ColorRange,
    Hsv,
    Mask,
    segment,
};

pub use coverage::{
    CalibrationFactor,
    CoverageConfig,
    CoverageConfigBuilder,
    CoverageEstimator,
    CoverageReport,
    CoverageResult,
    LabeledImage,
    RejectReason,
    RejectedInput,
    estimate_batch,
    estimate_one,
    to_area,
};

pub use export::{
    CsvReportWriter,
    ReportWriter,
    encode_mask_png,
};

pub use conversions::{
    CoveragePipeline,
    PipelineOutput,
    Upload,
};
