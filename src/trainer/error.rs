/// Root mean squared error over a stream of residuals.
#[derive(Default, Debug, Copy, Clone)]
pub struct Rmse {
    squared_sum: f64,
    n_residuals: usize,
}

impl Rmse {
    pub fn push(&mut self, residual: f64) {
        self.squared_sum += residual * residual;
        self.n_residuals += 1;
    }

    /// Zero when nothing has been pushed.
    #[must_use]
    pub fn value(&self) -> f64 {
        (self.squared_sum / self.n_residuals.max(1) as f64).sqrt()
    }
}

impl Extend<f64> for Rmse {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, residuals: I) {
        for residual in residuals {
            self.push(residual);
        }
    }
}

impl FromIterator<f64> for Rmse {
    fn from_iter<I: IntoIterator<Item = f64>>(residuals: I) -> Self {
        let mut rmse = Self::default();
        rmse.extend(residuals);
        rmse
    }
}
