use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::math::vector::Vector;
use crate::prelude::*;

pub const FEATURE_NAMES: [&str; 2] = ["income", "expense"];
pub const TARGET_NAME: &str = "savings";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Record {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
}

impl Record {
    pub const fn new(income: f64, expense: f64, savings: f64) -> Self {
        Self {
            income,
            expense,
            savings,
        }
    }

    /// Feature values in the [`FEATURE_NAMES`] order.
    pub fn features(&self) -> Vector {
        vec![self.income, self.expense]
    }
}

const SAMPLE: [Record; 5] = [
    Record::new(4000.0, 2000.0, 2000.0),
    Record::new(5000.0, 2500.0, 2500.0),
    Record::new(6000.0, 3000.0, 3000.0),
    Record::new(7000.0, 3500.0, 3500.0),
    Record::new(8000.0, 4000.0, 4000.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    /// The bundled dataset.
    pub fn sample() -> Self {
        Self {
            records: SAMPLE.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn feature_names() -> Vec<String> {
        FEATURE_NAMES.iter().map(ToString::to_string).collect()
    }

    pub fn features(&self) -> Vec<Vector> {
        self.records.iter().map(Record::features).collect()
    }

    pub fn targets(&self) -> Vector {
        self.records.iter().map(|record| record.savings).collect()
    }

    /// Shuffles the records with the seeded generator and splits them into `(train, test)`.
    ///
    /// The ChaCha stream is fixed for a given seed, so the split is stable across releases.
    /// The test partition takes `ceil(test_size · n)` records.
    #[instrument(skip(self), fields(n_records = self.len()))]
    pub fn split(&self, test_size: f64, seed: u64) -> Result<(Self, Self)> {
        ensure!(
            test_size > 0.0 && test_size < 1.0,
            "test size {} is not within (0, 1)",
            test_size,
        );
        let n_test = (test_size * self.len() as f64).ceil() as usize;
        let n_train = self.len().saturating_sub(n_test);
        ensure!(
            n_test >= 1 && n_train >= 1,
            "cannot split {} records with test size {}",
            self.len(),
            test_size,
        );

        let mut records = self.records.clone();
        records.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
        let train = records.split_off(n_test);
        debug!(n_train, n_test);
        Ok((Self { records: train }, Self { records }))
    }
}
