//! Export module
//!
//! CSV reports of coverage results and PNG renderings of masks.

mod writer;
mod csv_report_writer;
mod mask_png;

#[cfg(test)]
mod tests;

pub use writer::ReportWriter;
pub use csv_report_writer::CsvReportWriter;
pub use mask_png::{encode_mask_png, mask_to_luma, write_mask_png};
