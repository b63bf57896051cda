//! Image decoding module
//!
//! Turns uploaded byte streams into in-memory RGB images.

mod reader;
mod standard_decoder;
pub mod types;

pub use reader::ImageDecoder;
pub use standard_decoder::StandardImageDecoder;
pub use types::{PlantImage, RGB_CHANNELS};
