use std::io::Write;
use tracing::debug;
use crate::canopy_pipeline::common::error::Result;
use crate::canopy_pipeline::coverage::CoverageResult;
use crate::canopy_pipeline::export::writer::ReportWriter;

/// Writes one `Image Name,Canopy Coverage (cm²)` row per accepted image,
/// in result order, with no index column.
pub struct CsvReportWriter;

impl ReportWriter for CsvReportWriter {
    fn write_report(&self, results: &[CoverageResult], output: &mut dyn Write) -> Result<()> {
        debug!("Writing CSV report with {} rows", results.len());

        let mut writer = csv::Writer::from_writer(output);

        // serialize() only emits a header alongside the first record
        if results.is_empty() {
            writer.write_record(["Image Name", "Canopy Coverage (cm²)"])?;
        }
        for result in results {
            writer.serialize(result)?;
        }
        writer.flush()?;

        Ok(())
    }
}
