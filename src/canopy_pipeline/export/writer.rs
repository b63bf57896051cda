use std::io::Write;
use crate::canopy_pipeline::common::error::Result;
use crate::canopy_pipeline::coverage::CoverageResult;

pub trait ReportWriter {
    fn write_report(&self, results: &[CoverageResult], output: &mut dyn Write) -> Result<()>;
}
