//! Coverage estimation configuration

use crate::canopy_pipeline::common::error::Result;
use crate::canopy_pipeline::coverage::types::CalibrationFactor;
use crate::canopy_pipeline::segmentation::ColorRange;

/// Upload size limit applied per image (5 MiB)
pub const DEFAULT_SIZE_LIMIT_BYTES: usize = 5 * 1024 * 1024;

/// Configuration for canopy coverage estimation
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageConfig {
    /// HSV range selecting canopy pixels
    pub color_range: ColorRange,
    /// Pixels per cm²
    pub calibration: CalibrationFactor,
    /// Images whose serialized size exceeds this are rejected as too large
    pub size_limit_bytes: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            color_range: ColorRange::default(),
            calibration: CalibrationFactor::default(),
            size_limit_bytes: DEFAULT_SIZE_LIMIT_BYTES,
        }
    }
}

impl CoverageConfig {
    pub fn builder() -> CoverageConfigBuilder {
        CoverageConfigBuilder::default()
    }

    /// Rejects configurations that would make every image fail.
    pub fn validate(&self) -> Result<()> {
        self.color_range.validate()?;
        CalibrationFactor::new(self.calibration.pixels_per_cm2())?;
        Ok(())
    }
}

/// Builder for CoverageConfig
#[derive(Default)]
pub struct CoverageConfigBuilder {
    color_range: Option<ColorRange>,
    calibration: Option<CalibrationFactor>,
    size_limit_bytes: Option<usize>,
}

impl CoverageConfigBuilder {
    pub fn color_range(mut self, range: ColorRange) -> Self {
        self.color_range = Some(range);
        self
    }

    pub fn calibration(mut self, calibration: CalibrationFactor) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn size_limit_bytes(mut self, limit: usize) -> Self {
        self.size_limit_bytes = Some(limit);
        self
    }

    pub fn build(self) -> CoverageConfig {
        let default = CoverageConfig::default();
        CoverageConfig {
            color_range: self.color_range.unwrap_or(default.color_range),
            calibration: self.calibration.unwrap_or(default.calibration),
            size_limit_bytes: self.size_limit_bytes.unwrap_or(default.size_limit_bytes),
        }
    }
}
