//! Named-column data tables loaded from CSV.
//!
//! Values are kept as text and parsed on demand, so non-numeric columns such
//! as dates can sit next to the measurements without failing the load.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::canopy_pipeline::common::error::{CanopyError, Result};

pub const AIR_TEMP_MEAN_COLUMN: &str = "Air Temp Mean (°C)";
pub const WATER_TEMP_MEAN_COLUMN: &str = "Water Temp Mean (°C)";
pub const CANOPY_COVERAGE_COLUMN: &str = "Canopy Coverage (cm²)";

/// Column layout of the daily environment log
pub const ENVIRONMENT_COLUMNS: [&str; 16] = [
    "Day",
    "Air Temp Low (°C)",
    AIR_TEMP_MEAN_COLUMN,
    "Air Temp High (°C)",
    "Air Humid Low (%)",
    "Air Humid Mean (%)",
    "Air Humid High (%)",
    "Water Temp Low (°C)",
    WATER_TEMP_MEAN_COLUMN,
    "Water Temp High (°C)",
    "Water Humid Low (°C)",
    "Water Humid Mean (°C)",
    "Water Humid High (%)",
    CANOPY_COVERAGE_COLUMN,
    "Water Consumption (mL)",
    "Seed Count",
];

/// How default axes are chosen when no explicit column is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisSelection {
    /// Preferred pair only when both exist, else the first two columns
    #[default]
    Paired,
    /// Each preferred column on its own, falling back to the first column
    Independent,
}

/// Starting text offered for manual data entry
pub const DEFAULT_MANUAL_ENTRY: &str = "Property_1,Property_2\n20,10\n25,15";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        for record in &records {
            if record.len() != headers.len() {
                return Err(CanopyError::ColumnCountMismatch {
                    expected: headers.len(),
                    found: record.len(),
                });
            }
        }
        Ok(Self { headers, records })
    }

    /// Reads a headed CSV. Ragged rows are an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let records = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

        debug!("Loaded table with {} columns and {} rows", headers.len(), records.len());
        Self::new(headers, records)
    }

    /// Parses manually entered CSV text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            CanopyError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Replaces the header row. The new names must cover every column
    /// exactly; no padding or truncation is applied.
    pub fn with_column_names<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        if names.len() != self.headers.len() {
            return Err(CanopyError::ColumnCountMismatch {
                expected: self.headers.len(),
                found: names.len(),
            });
        }
        self.headers = names.iter().map(|n| n.as_ref().to_string()).collect();
        Ok(self)
    }

    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| CanopyError::ColumnNotFound(name.to_string()))?;
        Ok(self.records.iter().map(|r| r[index].as_str()).collect())
    }

    /// Parses every cell of `name` as a float. Blank or malformed cells fail
    /// the whole column rather than being dropped.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.parse::<f64>().map_err(|_| CanopyError::NonNumericValue {
                    column: name.to_string(),
                    row,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    /// Picks the preferred pair when both columns exist, otherwise the first
    /// two columns (the first one twice for a single-column table).
    pub fn select_axes(&self, preferred_x: &str, preferred_y: &str) -> Option<(String, String)> {
        if self.column_index(preferred_x).is_some() && self.column_index(preferred_y).is_some() {
            return Some((preferred_x.to_string(), preferred_y.to_string()));
        }
        let x = self.headers.first()?;
        let y = self.headers.get(1).unwrap_or(x);
        Some((x.clone(), y.clone()))
    }

    /// Looks each preferred column up on its own; a missing one falls back
    /// to the first column.
    pub fn select_axes_independently(&self, preferred_x: &str, preferred_y: &str) -> Option<(String, String)> {
        let first = self.headers.first()?;
        let pick = |preferred: &str| {
            self.column_index(preferred)
                .map_or_else(|| first.clone(), |_| preferred.to_string())
        };
        Some((pick(preferred_x), pick(preferred_y)))
    }

    pub fn select_axes_with(
        &self,
        selection: AxisSelection,
        preferred_x: &str,
        preferred_y: &str,
    ) -> Option<(String, String)> {
        match selection {
            AxisSelection::Paired => self.select_axes(preferred_x, preferred_y),
            AxisSelection::Independent => self.select_axes_independently(preferred_x, preferred_y),
        }
    }

    pub fn write_csv(&self, output: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| CanopyError::EncodeError(e.to_string()))
    }
}
