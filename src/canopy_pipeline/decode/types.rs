//! In-memory image types

use crate::canopy_pipeline::common::error::{CanopyError, Result};

/// Number of interleaved samples per pixel (R, G, B)
pub const RGB_CHANNELS: usize = 3;

/// Decoded 8-bit RGB image handed to the segmentation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples per pixel; anything other than 3 is rejected by the engine
    pub channels: usize,
    /// Pixel data interleaved [R, G, B, R, G, B, ...], row-major
    pub data: Vec<u8>,
    /// Length of the encoded payload this image was decoded from, if any
    pub encoded_len: Option<usize>,
}

impl PlantImage {
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels: RGB_CHANNELS,
            data,
            encoded_len: None,
        }
    }

    /// Image of `width`x`height` where every pixel is `rgb`.
    ///
    /// Dimensions whose sample count overflows `usize` produce an empty
    /// buffer, which `validate` rejects.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let samples = sample_count(width, height, RGB_CHANNELS).unwrap_or(0);
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(samples)
            .collect();
        Self::from_rgb(width, height, data)
    }

    pub fn with_encoded_len(mut self, len: usize) -> Self {
        self.encoded_len = Some(len);
        self
    }

    /// Size used against the upload limit: the encoded payload when the image
    /// came from bytes, otherwise the raw sample buffer.
    pub fn serialized_len(&self) -> usize {
        self.encoded_len.unwrap_or(self.data.len())
    }

    /// `None` when width x height overflows `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Checks the shape invariants: non-zero area, 3 channels, and a sample
    /// buffer that matches the declared dimensions.
    pub fn validate(&self) -> Result<()> {
        let expected = sample_count(self.width, self.height, self.channels);
        if self.width == 0
            || self.height == 0
            || self.channels != RGB_CHANNELS
            || expected != Some(self.data.len())
        {
            return Err(CanopyError::InvalidInput {
                width: self.width,
                height: self.height,
                channels: self.channels,
                samples: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data
            .chunks_exact(RGB_CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
    }
}

fn sample_count(width: usize, height: usize, channels: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(channels)
}
