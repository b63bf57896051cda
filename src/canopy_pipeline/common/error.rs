use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanopyError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image: width={width}, height={height}, channels={channels}, samples={samples}")]
    InvalidInput {
        width: usize,
        height: usize,
        channels: usize,
        samples: usize,
    },

    #[error("Invalid color range: {0}")]
    InvalidRange(String),

    #[error("Invalid calibration factor: {0} (must be positive and finite)")]
    InvalidCalibration(f64),

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Non-numeric value {value:?} in column {column:?} at row {row}")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Column count mismatch: expected {expected}, found {found}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Polynomial fit failed: {0}")]
    FitError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CanopyError>;
