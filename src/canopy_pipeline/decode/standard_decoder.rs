//! Image decoder implementation using the image library.
//!
//! Handles the upload formats accepted by the estimator (PNG and JPEG) and
//! flattens every color type to 8-bit RGB, dropping alpha.

use tracing::debug;
use crate::canopy_pipeline::common::error::{Result, CanopyError};
use crate::canopy_pipeline::decode::types::PlantImage;
use crate::canopy_pipeline::decode::reader::ImageDecoder;

/// Decoder backed by `image::load_from_memory`.
///
/// The container format is guessed from the payload's magic bytes, so
/// the file extension of an upload does not matter.
pub struct StandardImageDecoder;

impl ImageDecoder for StandardImageDecoder {
    /// Decodes an encoded image into an RGB buffer.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use canopy_coverage_rs::canopy_pipeline::{ImageDecoder, StandardImageDecoder};
    ///
    /// let bytes = std::fs::read("plant.jpg").unwrap();
    /// let image = StandardImageDecoder.decode(&bytes).unwrap();
    /// assert_eq!(image.channels, 3);
    /// ```
    fn decode(&self, data: &[u8]) -> Result<PlantImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| CanopyError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded image: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        let rgb = decoded.to_rgb8();
        let width = rgb.width() as usize;
        let height = rgb.height() as usize;

        Ok(PlantImage::from_rgb(width, height, rgb.into_raw()).with_encoded_len(data.len()))
    }
}
