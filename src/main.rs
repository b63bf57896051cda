use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use canopy_coverage_rs::canopy_pipeline::{
    CalibrationFactor, CanopyError, ColorRange, CoverageConfig, CoveragePipeline, Hsv, Upload,
    coverage::DEFAULT_SIZE_LIMIT_BYTES, encode_mask_png,
};
use canopy_coverage_rs::correlation::{
    AIR_TEMP_MEAN_COLUMN, AxisSelection, CANOPY_COVERAGE_COLUMN, CorrelationConfig, DEFAULT_DEGREE,
    DataTable, WATER_TEMP_MEAN_COLUMN, correlate, prepare_table,
};
use canopy_coverage_rs::logger;

use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "canopy-coverage")]
#[command(version, about = "Estimate plant canopy coverage and correlate it with environment data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate canopy coverage (cm²) of one or more plant images
    Estimate {
        /// Input images (PNG or JPEG)
        #[arg(value_name = "IMAGES", required = true)]
        images: Vec<PathBuf>,

        /// Write the CSV report here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write a <name>_mask.png for every accepted image into this directory
        #[arg(long, value_name = "DIR")]
        mask_dir: Option<PathBuf>,

        /// Calibration factor in pixels per cm²
        #[arg(long, value_name = "FLOAT", default_value_t = 4096.0)]
        calibration: f64,

        /// Maximum accepted file size in bytes
        #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_SIZE_LIMIT_BYTES)]
        max_size: usize,

        /// Lower HSV bound (hue 0-179, saturation and value 0-255)
        #[arg(long, value_name = "H,S,V", default_value = "35,50,50", value_parser = parse_hsv)]
        lower: Hsv,

        /// Upper HSV bound (hue 0-179, saturation and value 0-255)
        #[arg(long, value_name = "H,S,V", default_value = "85,255,255", value_parser = parse_hsv)]
        upper: Hsv,
    },

    /// Fit a polynomial between two columns of a CSV table
    Correlate {
        /// Input CSV file
        #[arg(value_name = "CSV", conflicts_with = "text", required_unless_present = "text")]
        input: Option<PathBuf>,

        /// CSV data entered inline instead of a file
        #[arg(long, value_name = "CSV")]
        text: Option<String>,

        /// X axis column
        #[arg(long, value_name = "COLUMN")]
        x: Option<String>,

        /// Y axis column
        #[arg(long, value_name = "COLUMN")]
        y: Option<String>,

        /// Polynomial degree (1-10)
        #[arg(short, long, value_name = "N", default_value_t = DEFAULT_DEGREE)]
        degree: usize,

        /// Comma separated header names replacing the file's header row
        #[arg(long, value_name = "NAMES", value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Default axis pair used when --x/--y are not given
        #[arg(long, value_enum, default_value_t = AxisPreset::Canopy)]
        preset: AxisPreset,

        /// Also write the loaded table back out as CSV
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisPreset {
    /// Air temperature against canopy coverage
    Canopy,
    /// Air temperature against water temperature
    Environment,
}

impl AxisPreset {
    fn axes(self) -> (&'static str, &'static str) {
        match self {
            AxisPreset::Canopy => (AIR_TEMP_MEAN_COLUMN, CANOPY_COVERAGE_COLUMN),
            AxisPreset::Environment => (AIR_TEMP_MEAN_COLUMN, WATER_TEMP_MEAN_COLUMN),
        }
    }

    fn selection(self) -> AxisSelection {
        match self {
            AxisPreset::Canopy => AxisSelection::Paired,
            AxisPreset::Environment => AxisSelection::Independent,
        }
    }
}

fn parse_hsv(s: &str) -> Result<Hsv, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected H,S,V but got {:?}", s));
    }
    let mut values = [0u8; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|e| format!("invalid component {:?}: {}", part, e))?;
    }
    Ok(Hsv::new(values[0], values[1], values[2]))
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Estimate {
            images,
            output,
            mask_dir,
            calibration,
            max_size,
            lower,
            upper,
        } => {
            let config = CoverageConfig::builder()
                .color_range(ColorRange::new(lower, upper)?)
                .calibration(CalibrationFactor::new(calibration)?)
                .size_limit_bytes(max_size)
                .build();
            run_estimate(config, &images, output.as_deref(), mask_dir.as_deref())
        }
        Commands::Correlate {
            input,
            text,
            x,
            y,
            degree,
            columns,
            preset,
            export,
        } => {
            let table = match (input, text) {
                (Some(path), _) => DataTable::from_path(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                (None, Some(text)) => DataTable::from_text(&text).context("parsing inline CSV")?,
                (None, None) => bail!("either a CSV file or --text is required"),
            };

            let (preferred_x, preferred_y) = preset.axes();
            let mut builder = CorrelationConfig::builder()
                .degree(degree)
                .preferred_axes(preferred_x, preferred_y)
                .axis_selection(preset.selection());
            if let Some(x) = x {
                builder = builder.x_column(x);
            }
            if let Some(y) = y {
                builder = builder.y_column(y);
            }
            if let Some(columns) = columns {
                builder = builder.column_names(columns);
            }

            let config = builder.build();
            let table = prepare_table(table, &config)?;

            if let Some(path) = &export {
                std::fs::write(path, table.to_csv_string()?)
                    .with_context(|| format!("writing {}", path.display()))?;
            }

            let report = correlate(&table, &config)?;
            println!("X: {}", report.x_column);
            println!("Y: {}", report.y_column);
            println!("Polynomial equation: {}", report.polynomial);
            println!("R^2: {:.3}", report.r_squared);
            Ok(())
        }
    }
}

fn run_estimate(
    config: CoverageConfig,
    images: &[PathBuf],
    output: Option<&Path>,
    mask_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let pipeline = CoveragePipeline::new(config)?;
    info!("Calibration: {} px/cm²", pipeline.config().calibration.pixels_per_cm2());

    let uploads = images
        .iter()
        .map(Upload::from_path)
        .collect::<Result<Vec<_>, CanopyError>>()?;

    if let Some(dir) = mask_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let report = pipeline.run_with(&uploads, |measurement| {
        let Some(dir) = mask_dir else {
            return Ok(());
        };
        let stem = Path::new(&measurement.result.label)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| measurement.result.label.clone());
        let path = dir.join(format!("{}_mask.png", stem));
        std::fs::write(&path, encode_mask_png(&measurement.mask)?).map_err(|e| {
            CanopyError::OutputWriteError(format!("{}: {}", path.display(), e))
        })
    })?;

    for result in &report.results {
        info!("The canopy coverage for {} is {} cm²", result.label, result.area_cm2);
    }
    for rejected in &report.rejected {
        warn!("Skipped {}: {}", rejected.label, rejected.reason);
    }
    if report.results.is_empty() {
        warn!("No images contributed to the report");
    }

    match output {
        Some(path) => pipeline.export_file(&report, path)?,
        None => pipeline.export(&report, &mut std::io::stdout().lock())?,
    }
    Ok(())
}
