//! Coverage estimation types

use std::fmt;

use serde::Serialize;

use crate::canopy_pipeline::common::error::{CanopyError, Result};
use crate::canopy_pipeline::decode::PlantImage;

/// Pixels per cm², obtained from a calibration shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationFactor(f64);

/// Calibration measured for the reference camera setup
pub const DEFAULT_PIXELS_PER_CM2: f64 = 4096.0;

impl CalibrationFactor {
    pub fn new(pixels_per_cm2: f64) -> Result<Self> {
        if !pixels_per_cm2.is_finite() || pixels_per_cm2 <= 0.0 {
            return Err(CanopyError::InvalidCalibration(pixels_per_cm2));
        }
        Ok(Self(pixels_per_cm2))
    }

    pub fn pixels_per_cm2(self) -> f64 {
        self.0
    }
}

impl Default for CalibrationFactor {
    fn default() -> Self {
        Self(DEFAULT_PIXELS_PER_CM2)
    }
}

/// An image paired with the label it is reported under
#[derive(Debug, Clone)]
pub struct LabeledImage {
    pub label: String,
    pub image: PlantImage,
}

impl LabeledImage {
    pub fn new(label: impl Into<String>, image: PlantImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}

/// Calibrated measurement for one accepted image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    #[serde(rename = "Image Name")]
    pub label: String,
    #[serde(skip)]
    pub pixel_count: u64,
    #[serde(rename = "Canopy Coverage (cm²)")]
    pub area_cm2: f64,
}

/// Why an input did not contribute to the report
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Serialized size above the configured limit
    TooLarge { size: usize, limit: usize },
    /// Segmentation or estimation failed for this item
    ProcessingError(String),
    /// The upload could not be decoded into an image
    DecodeError(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooLarge { size, limit } => {
                write!(f, "too large ({} bytes, limit {} bytes)", size, limit)
            }
            RejectReason::ProcessingError(message) => write!(f, "processing error: {}", message),
            RejectReason::DecodeError(message) => write!(f, "decode error: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedInput {
    pub label: String,
    pub reason: RejectReason,
}

/// Outcome of a batch: accepted results and rejected inputs, each in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    pub results: Vec<CoverageResult>,
    pub rejected: Vec<RejectedInput>,
}

impl CoverageReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.rejected.is_empty()
    }

    pub fn total_area_cm2(&self) -> f64 {
        self.results.iter().map(|r| r.area_cm2).sum()
    }

    pub fn total_pixels(&self) -> u64 {
        self.results.iter().map(|r| r.pixel_count).sum()
    }

    pub fn into_parts(self) -> (Vec<CoverageResult>, Vec<RejectedInput>) {
        (self.results, self.rejected)
    }
}
