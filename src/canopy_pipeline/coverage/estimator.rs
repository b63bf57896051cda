use tracing::{debug, info, instrument, warn};

use crate::canopy_pipeline::common::error::Result;
use crate::canopy_pipeline::coverage::config::CoverageConfig;
use crate::canopy_pipeline::coverage::types::{
    CalibrationFactor, CoverageReport, CoverageResult, LabeledImage, RejectReason, RejectedInput,
};
use crate::canopy_pipeline::decode::PlantImage;
use crate::canopy_pipeline::segmentation::{ColorRange, Mask, segment};

/// Number of canopy pixels in `mask`; never more than width x height.
pub fn estimate_one(mask: &Mask) -> u64 {
    mask.count_set()
}

/// Converts a pixel count to cm² using `calibration_factor` pixels per cm².
pub fn to_area(pixel_count: u64, calibration_factor: f64) -> Result<f64> {
    let factor = CalibrationFactor::new(calibration_factor)?;
    Ok(pixel_count as f64 / factor.pixels_per_cm2())
}

/// Estimates coverage for every image in order.
///
/// An invalid range or calibration aborts the call. Oversized images and
/// images that fail to process are returned in the second list instead.
pub fn estimate_batch(
    images: &[LabeledImage],
    color_range: &ColorRange,
    calibration_factor: f64,
    size_limit_bytes: usize,
) -> Result<(Vec<CoverageResult>, Vec<RejectedInput>)> {
    let config = CoverageConfig::builder()
        .color_range(*color_range)
        .calibration(CalibrationFactor::new(calibration_factor)?)
        .size_limit_bytes(size_limit_bytes)
        .build();
    let estimator = CoverageEstimator::new(config)?;
    Ok(estimator.estimate_batch(images).into_parts())
}

/// Result of measuring one image, with the mask it was counted from
#[derive(Debug, Clone)]
pub struct Measurement {
    pub result: CoverageResult,
    pub mask: Mask,
}

/// Estimator bound to a validated configuration
#[derive(Debug, Clone)]
pub struct CoverageEstimator {
    config: CoverageConfig,
}

impl Default for CoverageEstimator {
    fn default() -> Self {
        Self {
            config: CoverageConfig::default(),
        }
    }
}

impl CoverageEstimator {
    pub fn new(config: CoverageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Segments, counts and converts one image without any size check.
    pub fn measure(&self, label: &str, image: &PlantImage) -> Result<Measurement> {
        let mask = segment(image, &self.config.color_range)?;
        let pixel_count = estimate_one(&mask);
        let area_cm2 = to_area(pixel_count, self.config.calibration.pixels_per_cm2())?;

        debug!(label, pixel_count, area_cm2, "Measured canopy");

        Ok(Measurement {
            result: CoverageResult {
                label: label.to_string(),
                pixel_count,
                area_cm2,
            },
            mask,
        })
    }

    /// Runs the size check and the measurement, turning per-image failures
    /// into a rejection.
    pub fn assess(&self, item: &LabeledImage) -> std::result::Result<Measurement, RejectedInput> {
        let size = item.image.serialized_len();
        let limit = self.config.size_limit_bytes;
        if size > limit {
            warn!(label = %item.label, size, limit, "Image exceeds size limit");
            return Err(RejectedInput {
                label: item.label.clone(),
                reason: RejectReason::TooLarge { size, limit },
            });
        }

        self.measure(&item.label, &item.image).map_err(|e| {
            warn!(label = %item.label, error = %e, "Image could not be processed");
            RejectedInput {
                label: item.label.clone(),
                reason: RejectReason::ProcessingError(e.to_string()),
            }
        })
    }

    #[instrument(skip(self, images), fields(count = images.len()))]
    pub fn estimate_batch(&self, images: &[LabeledImage]) -> CoverageReport {
        let mut report = CoverageReport::default();

        for item in images {
            match self.assess(item) {
                Ok(measurement) => report.results.push(measurement.result),
                Err(rejected) => report.rejected.push(rejected),
            }
        }

        info!(
            accepted = report.results.len(),
            rejected = report.rejected.len(),
            total_cm2 = report.total_area_cm2(),
            "Batch estimation complete"
        );
        report
    }
}
