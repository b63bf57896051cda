//! PNG export of segmentation masks
//!
//! Masks are written as 8-bit grayscale: 255 where the pixel is in range,
//! 0 elsewhere.

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::canopy_pipeline::common::error::{CanopyError, Result};
use crate::canopy_pipeline::segmentation::Mask;

pub fn mask_to_luma(mask: &Mask) -> Vec<u8> {
    mask.data
        .iter()
        .map(|&set| if set { u8::MAX } else { 0 })
        .collect()
}

pub fn write_mask_png(mask: &Mask, output: &mut dyn Write) -> Result<()> {
    debug!("Encoding mask PNG: {}x{}", mask.width, mask.height);

    let width = u32::try_from(mask.width)
        .map_err(|_| CanopyError::EncodeError(format!("mask width {} too large", mask.width)))?;
    let height = u32::try_from(mask.height)
        .map_err(|_| CanopyError::EncodeError(format!("mask height {} too large", mask.height)))?;

    PngEncoder::new(output)
        .write_image(&mask_to_luma(mask), width, height, ExtendedColorType::L8)
        .map_err(|e| CanopyError::EncodeError(e.to_string()))
}

pub fn encode_mask_png(mask: &Mask) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_mask_png(mask, &mut buffer)?;
    Ok(buffer)
}
