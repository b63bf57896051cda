use tracing::{debug, instrument};

use crate::canopy_pipeline::common::error::Result;
use crate::canopy_pipeline::decode::PlantImage;
use crate::canopy_pipeline::segmentation::hsv::rgb_to_hsv;
use crate::canopy_pipeline::segmentation::types::{ColorRange, Mask};

/// Thresholds `image` in HSV space, marking every pixel whose hue,
/// saturation and value all fall inside `range` (bounds inclusive).
///
/// # Errors
///
/// * `InvalidRange` - a lower bound exceeds its upper bound
/// * `InvalidInput` - zero area, a channel count other than 3, or a sample
///   buffer that does not match the dimensions
#[instrument(skip(image, range), fields(width = image.width, height = image.height, range = %range))]
pub fn segment(image: &PlantImage, range: &ColorRange) -> Result<Mask> {
    range.validate()?;
    image.validate()?;

    let data: Vec<bool> = image
        .pixels()
        .map(|rgb| range.contains(rgb_to_hsv(rgb)))
        .collect();

    debug!("Segmented {} pixels", data.len());

    Ok(Mask {
        width: image.width,
        height: image.height,
        data,
    })
}
