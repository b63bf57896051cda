pub mod canopy_pipeline;
pub mod correlation;
pub mod logger;
