//! Correlation module
//!
//! Loads tabular environment data and fits a polynomial between two of its
//! columns, reporting the fitted curve and R².

mod analysis;
pub mod polyfit;
pub mod table;

#[cfg(test)]
mod tests;

pub use analysis::{
    CorrelationConfig, CorrelationConfigBuilder, CorrelationReport, DEFAULT_CURVE_POINTS,
    DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE, correlate, prepare_table,
};
pub use polyfit::{Polynomial, r_squared};
pub use table::{
    AIR_TEMP_MEAN_COLUMN, AxisSelection, CANOPY_COVERAGE_COLUMN, DEFAULT_MANUAL_ENTRY, DataTable,
    ENVIRONMENT_COLUMNS, WATER_TEMP_MEAN_COLUMN,
};
