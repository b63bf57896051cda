use tracing::{info, instrument};

use crate::canopy_pipeline::common::error::{CanopyError, Result};
use crate::correlation::polyfit::{Polynomial, r_squared};
use crate::correlation::table::{AIR_TEMP_MEAN_COLUMN, AxisSelection, CANOPY_COVERAGE_COLUMN, DataTable};

pub const MIN_DEGREE: usize = 1;
pub const MAX_DEGREE: usize = 10;
pub const DEFAULT_DEGREE: usize = 3;
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Configuration for correlating two table columns
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    /// X axis column; the preferred default pair is used when unset
    pub x_column: Option<String>,
    /// Y axis column; the preferred default pair is used when unset
    pub y_column: Option<String>,
    /// Polynomial degree, 1..=10
    pub degree: usize,
    /// Number of samples in the fitted curve
    pub curve_points: usize,
    /// Header names applied to the table before the lookup
    pub column_names: Option<Vec<String>>,
    /// Pair tried first when no explicit axis is given
    pub preferred_axes: (String, String),
    /// Fallback rule when a preferred column is missing
    pub axis_selection: AxisSelection,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            x_column: None,
            y_column: None,
            degree: DEFAULT_DEGREE,
            curve_points: DEFAULT_CURVE_POINTS,
            column_names: None,
            preferred_axes: (AIR_TEMP_MEAN_COLUMN.to_string(), CANOPY_COVERAGE_COLUMN.to_string()),
            axis_selection: AxisSelection::Paired,
        }
    }
}

impl CorrelationConfig {
    pub fn builder() -> CorrelationConfigBuilder {
        CorrelationConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&self.degree) {
            return Err(CanopyError::InvalidParameter {
                parameter: "degree".to_string(),
                value: self.degree.to_string(),
            });
        }
        if self.curve_points < 2 {
            return Err(CanopyError::InvalidParameter {
                parameter: "curve_points".to_string(),
                value: self.curve_points.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for CorrelationConfig
#[derive(Default)]
pub struct CorrelationConfigBuilder {
    x_column: Option<String>,
    y_column: Option<String>,
    degree: Option<usize>,
    curve_points: Option<usize>,
    column_names: Option<Vec<String>>,
    preferred_axes: Option<(String, String)>,
    axis_selection: Option<AxisSelection>,
}

impl CorrelationConfigBuilder {
    pub fn x_column(mut self, column: impl Into<String>) -> Self {
        self.x_column = Some(column.into());
        self
    }

    pub fn y_column(mut self, column: impl Into<String>) -> Self {
        self.y_column = Some(column.into());
        self
    }

    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
        self
    }

    pub fn curve_points(mut self, points: usize) -> Self {
        self.curve_points = Some(points);
        self
    }

    pub fn column_names(mut self, names: Vec<String>) -> Self {
        self.column_names = Some(names);
        self
    }

    pub fn preferred_axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.preferred_axes = Some((x.into(), y.into()));
        self
    }

    pub fn axis_selection(mut self, selection: AxisSelection) -> Self {
        self.axis_selection = Some(selection);
        self
    }

    pub fn build(self) -> CorrelationConfig {
        let default = CorrelationConfig::default();
        CorrelationConfig {
            x_column: self.x_column.or(default.x_column),
            y_column: self.y_column.or(default.y_column),
            degree: self.degree.unwrap_or(default.degree),
            curve_points: self.curve_points.unwrap_or(default.curve_points),
            column_names: self.column_names.or(default.column_names),
            preferred_axes: self.preferred_axes.unwrap_or(default.preferred_axes),
            axis_selection: self.axis_selection.unwrap_or(default.axis_selection),
        }
    }
}

/// Fit of one column against another
#[derive(Debug, Clone)]
pub struct CorrelationReport {
    pub x_column: String,
    pub y_column: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub polynomial: Polynomial,
    /// Polynomial evaluated at every x
    pub fitted: Vec<f64>,
    /// Smooth curve over [min x, max x]
    pub curve: Vec<(f64, f64)>,
    pub r_squared: f64,
}

/// Applies the configured header names, if any. This is the table the
/// fit runs on and the one to export.
pub fn prepare_table(table: DataTable, config: &CorrelationConfig) -> Result<DataTable> {
    match &config.column_names {
        Some(names) => table.with_column_names(names),
        None => Ok(table),
    }
}

#[instrument(skip(table, config), fields(rows = table.len(), degree = config.degree))]
pub fn correlate(table: &DataTable, config: &CorrelationConfig) -> Result<CorrelationReport> {
    config.validate()?;

    let renamed;
    let table = match &config.column_names {
        Some(_) => {
            renamed = prepare_table(table.clone(), config)?;
            &renamed
        }
        None => table,
    };

    let (default_x, default_y) = table
        .select_axes_with(config.axis_selection, &config.preferred_axes.0, &config.preferred_axes.1)
        .ok_or_else(|| CanopyError::ColumnNotFound("table has no columns".to_string()))?;
    let x_column = config.x_column.clone().unwrap_or(default_x);
    let y_column = config.y_column.clone().unwrap_or(default_y);

    let x = table.numeric_column(&x_column)?;
    let y = table.numeric_column(&y_column)?;

    let polynomial = Polynomial::fit(&x, &y, config.degree)?;
    let fitted = polynomial.evaluate_all(&x);
    let r_squared = r_squared(&y, &fitted)?;

    let min_x = x.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let curve = polynomial.sample_curve(min_x, max_x, config.curve_points);

    info!(
        x = %x_column,
        y = %y_column,
        r_squared,
        "Polynomial fit complete"
    );

    Ok(CorrelationReport {
        x_column,
        y_column,
        x,
        y,
        polynomial,
        fitted,
        curve,
        r_squared,
    })
}
