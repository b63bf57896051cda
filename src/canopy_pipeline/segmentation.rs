//! Color segmentation module
//!
//! Converts RGB pixels to HSV and selects the ones inside a configured range.

mod engine;
pub mod hsv;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::segment;
pub use hsv::rgb_to_hsv;
pub use types::{ColorRange, Hsv, Mask, GREEN_LOWER, GREEN_UPPER};
