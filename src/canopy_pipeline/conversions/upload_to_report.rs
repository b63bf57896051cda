use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::canopy_pipeline::{
    common::error::{CanopyError, Result},
    coverage::{CoverageConfig, CoverageEstimator, CoverageReport, LabeledImage, Measurement, RejectReason, RejectedInput},
    decode::{ImageDecoder, StandardImageDecoder},
    export::{CsvReportWriter, ReportWriter},
    segmentation::Mask,
};

/// Encoded image bytes as received from an upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub label: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }

    /// Reads a file, labelling it with its file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CanopyError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(label, bytes))
    }
}

/// Report of a pipeline run plus the mask of the last accepted image,
/// if any image was accepted.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub report: CoverageReport,
    pub last_mask: Option<Mask>,
}

pub struct CoveragePipeline<D: ImageDecoder, W: ReportWriter> {
    decoder: D,
    writer: W,
    estimator: CoverageEstimator,
}

impl CoveragePipeline<StandardImageDecoder, CsvReportWriter> {
    pub fn new(config: CoverageConfig) -> Result<Self> {
        Self::with_custom(StandardImageDecoder, CsvReportWriter, config)
    }
}

impl<D: ImageDecoder, W: ReportWriter> CoveragePipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: CoverageConfig) -> Result<Self> {
        Ok(Self {
            decoder,
            writer,
            estimator: CoverageEstimator::new(config)?,
        })
    }

    /// Size check, decode and measurement for a single upload.
    ///
    /// Oversized uploads are rejected before decoding.
    pub fn process(&self, upload: &Upload) -> std::result::Result<Measurement, RejectedInput> {
        let limit = self.config().size_limit_bytes;
        if upload.bytes.len() > limit {
            warn!(label = %upload.label, size = upload.bytes.len(), limit, "Upload exceeds size limit");
            return Err(RejectedInput {
                label: upload.label.clone(),
                reason: RejectReason::TooLarge {
                    size: upload.bytes.len(),
                    limit,
                },
            });
        }

        let image = {
            let _span = tracing::info_span!("decode_image", label = %upload.label).entered();
            self.decoder.decode(&upload.bytes).map_err(|e| {
                warn!(label = %upload.label, error = %e, "Upload could not be decoded");
                RejectedInput {
                    label: upload.label.clone(),
                    reason: RejectReason::DecodeError(e.to_string()),
                }
            })?
        };

        let _span = tracing::info_span!("estimate_coverage",
            label = %upload.label,
            width = image.width,
            height = image.height
        ).entered();
        self.estimator.assess(&LabeledImage::new(upload.label.clone(), image))
    }

    /// Processes uploads in order, calling `on_accept` for every accepted
    /// measurement. An error from the callback aborts the run.
    #[instrument(skip(self, uploads, on_accept), fields(count = uploads.len()))]
    pub fn run_with<F>(&self, uploads: &[Upload], mut on_accept: F) -> Result<CoverageReport>
    where
        F: FnMut(&Measurement) -> Result<()>,
    {
        info!("Starting canopy coverage estimation");

        let mut report = CoverageReport::default();
        for upload in uploads {
            match self.process(upload) {
                Ok(measurement) => {
                    on_accept(&measurement)?;
                    report.results.push(measurement.result);
                }
                Err(rejected) => report.rejected.push(rejected),
            }
        }

        if uploads.is_empty() {
            warn!("No images supplied");
        }

        info!(
            accepted = report.results.len(),
            rejected = report.rejected.len(),
            total_cm2 = report.total_area_cm2(),
            "Estimation complete"
        );
        Ok(report)
    }

    pub fn run(&self, uploads: &[Upload]) -> Result<PipelineOutput> {
        let mut last_mask = None;
        let report = self.run_with(uploads, |measurement| {
            last_mask = Some(measurement.mask.clone());
            Ok(())
        })?;
        Ok(PipelineOutput { report, last_mask })
    }

    #[instrument(skip(self, paths))]
    pub fn run_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<PipelineOutput> {
        let uploads = {
            let _span = tracing::info_span!("read_input_files").entered();
            paths
                .iter()
                .map(Upload::from_path)
                .collect::<Result<Vec<_>>>()?
        };
        self.run(&uploads)
    }

    pub fn export(&self, report: &CoverageReport, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("export_report", rows = report.results.len()).entered();
        self.writer.write_report(&report.results, output)
    }

    pub fn export_file<P: AsRef<Path>>(&self, report: &CoverageReport, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        info!(output = %output_path.display(), "Writing report");

        let mut output_file = std::fs::File::create(output_path).map_err(|e| {
            CanopyError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        self.export(report, &mut output_file)
    }

    pub fn config(&self) -> &CoverageConfig {
        self.estimator.config()
    }

    pub fn set_config(&mut self, config: CoverageConfig) -> Result<()> {
        self.estimator = CoverageEstimator::new(config)?;
        Ok(())
    }
}
