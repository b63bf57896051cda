//! Least-squares polynomial fitting and goodness of fit.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::canopy_pipeline::common::error::{CanopyError, Result};

/// Polynomial with coefficients stored lowest power first
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Fits `y ≈ p(x)` of the given degree by least squares.
    ///
    /// The Vandermonde columns are scaled to unit norm before the SVD solve
    /// to keep high degrees well conditioned. Needs at least `degree + 1`
    /// finite points.
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self> {
        if x.len() != y.len() {
            return Err(CanopyError::FitError(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() <= degree {
            return Err(CanopyError::FitError(format!(
                "degree {} needs at least {} points, got {}",
                degree,
                degree + 1,
                x.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(CanopyError::FitError("input contains non-finite values".to_string()));
        }

        let rows = x.len();
        let cols = degree + 1;
        let mut vandermonde = DMatrix::from_fn(rows, cols, |i, j| x[i].powi(j as i32));

        let mut scales = Vec::with_capacity(cols);
        for j in 0..cols {
            let norm = vandermonde.column(j).norm();
            let scale = if norm > 0.0 { norm } else { 1.0 };
            vandermonde.column_mut(j).unscale_mut(scale);
            scales.push(scale);
        }

        let rhs = DVector::from_column_slice(y);
        let svd = vandermonde.svd(true, true);
        let cutoff = svd.singular_values.max() * rows as f64 * f64::EPSILON;
        let solution = svd
            .solve(&rhs, cutoff)
            .map_err(|e| CanopyError::FitError(e.to_string()))?;

        let coefficients = solution
            .iter()
            .zip(&scales)
            .map(|(c, scale)| c / scale)
            .collect();

        Ok(Self { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Coefficients, constant term first
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        // Horner
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// `points` evenly spaced samples of the curve over `[min, max]`,
    /// both ends included.
    pub fn sample_curve(&self, min: f64, max: f64, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => Vec::new(),
            1 => vec![(min, self.evaluate(min))],
            _ => {
                let step = (max - min) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = if i == points - 1 { max } else { min + step * i as f64 };
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }
        for (i, (power, c)) in self.coefficients.iter().enumerate().rev().enumerate() {
            if i == 0 {
                write!(f, "{:.4}", c)?;
            } else if *c < 0.0 {
                write!(f, " - {:.4}", -c)?;
            } else {
                write!(f, " + {:.4}", c)?;
            }
            match power {
                0 => {}
                1 => write!(f, " x")?,
                _ => write!(f, " x^{}", power)?,
            }
        }
        Ok(())
    }
}

/// Coefficient of determination of `predicted` against `observed`.
///
/// A constant `observed` series scores 1.0 when predicted exactly and 0.0
/// otherwise.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> Result<f64> {
    if observed.len() != predicted.len() {
        return Err(CanopyError::FitError(format!(
            "observed has {} values but predicted has {}",
            observed.len(),
            predicted.len()
        )));
    }
    if observed.is_empty() {
        return Err(CanopyError::FitError("no values to score".to_string()));
    }

    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}
