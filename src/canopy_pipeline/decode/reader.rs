use crate::canopy_pipeline::common::error::Result;
use crate::canopy_pipeline::decode::types::PlantImage;

pub trait ImageDecoder {
    fn decode(&self, data: &[u8]) -> Result<PlantImage>;
}
