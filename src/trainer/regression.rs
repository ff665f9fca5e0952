//! Ordinary least squares with an intercept.
//!
//! The centered least-squares problem is solved through the SVD pseudo-inverse,
//! so that collinear features still get the minimum-norm solution instead of a failure.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::math::vector::{dot, Vector};
use crate::prelude::*;

/// Singular values below `σ_max · RCOND` are treated as zero.
const RCOND: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub feature_names: Vec<String>,

    /// Name of the predicted variable.
    pub target_name: String,

    pub coefficients: Vector,
    pub intercept: f64,

    /// Effective rank of the centered feature matrix.
    pub rank: usize,

    pub n_samples: usize,
}

impl LinearRegression {
    #[instrument(skip_all, fields(n_samples = x.len(), n_features = feature_names.len()))]
    pub fn fit(feature_names: Vec<String>, x: &[Vector], y: &[f64]) -> Result<Self> {
        let n_features = feature_names.len();
        ensure!(n_features != 0, "cannot fit without features");
        ensure!(!x.is_empty(), "cannot fit on an empty training set");
        ensure!(
            x.len() == y.len(),
            "got {} rows but {} targets",
            x.len(),
            y.len(),
        );
        for (i, row) in x.iter().enumerate() {
            ensure!(
                row.len() == n_features,
                "row #{} has {} values, expected {}",
                i,
                row.len(),
                n_features,
            );
            ensure!(row.iter().all(|xi| xi.is_finite()), "row #{} is not finite", i);
        }
        ensure!(y.iter().all(|yi| yi.is_finite()), "targets are not finite");

        let x_mean: Vector = (0..n_features)
            .map(|j| x.iter().map(|row| row[j]).mean())
            .collect();
        let y_mean = y.mean();

        let centered = DMatrix::from_fn(x.len(), n_features, |i, j| x[i][j] - x_mean[j]);
        let target = DVector::from_iterator(y.len(), y.iter().map(|yi| yi - y_mean));
        let svd = centered.svd(true, true);
        let eps = svd.singular_values.iter().copied().fold(0.0, f64::max) * RCOND;
        let rank = svd.rank(eps);
        let coefficients: Vector = svd
            .solve(&target, eps)
            .map_err(|error| anyhow!("failed to solve the least squares: {}", error))?
            .iter()
            .copied()
            .collect();
        if rank < n_features {
            warn!(rank, n_features, "features are collinear, using the minimum-norm solution");
        }
        let intercept = y_mean - dot(&coefficients, &x_mean);

        Ok(Self {
            feature_names,
            target_name: "target".to_string(),
            coefficients,
            intercept,
            rank,
            n_samples: x.len(),
        })
    }

    #[must_use]
    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = target_name.into();
        self
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        ensure!(
            row.len() == self.coefficients.len(),
            "expected {} features, got {}",
            self.coefficients.len(),
            row.len(),
        );
        Ok(self.intercept + dot(&self.coefficients, row))
    }

    /// Checks the internal consistency of a model, for instance, one read from disk.
    pub fn validate(&self) -> Result {
        ensure!(
            self.coefficients.len() == self.feature_names.len(),
            "{} coefficients for {} features",
            self.coefficients.len(),
            self.feature_names.len(),
        );
        ensure!(
            self.intercept.is_finite() && self.coefficients.iter().all(|k| k.is_finite()),
            "model parameters are not finite",
        );
        Ok(())
    }
}
