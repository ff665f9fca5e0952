//! Fits the savings regression on the bundled dataset and persists it.

use crate::artifact;
use crate::opts::TrainOpts;
use crate::prelude::*;
use crate::trainer::dataset::{Dataset, TARGET_NAME};
use crate::trainer::error::Rmse;
use crate::trainer::regression::LinearRegression;

pub mod dataset;
pub mod error;
pub mod regression;

#[instrument(skip_all, fields(output = ?opts.output, test_size = opts.test_size, seed = opts.seed))]
pub fn run(opts: TrainOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "trainer"));

    let start_instant = Instant::now();
    let model = fit(&Dataset::sample(), opts.test_size, opts.seed)?;
    artifact::save(&model, &opts.output)?;
    info!(elapsed = ?start_instant.elapsed(), "model saved");
    Ok(())
}

/// Splits the dataset, fits the training partition and logs the errors on both partitions.
pub fn fit(dataset: &Dataset, test_size: f64, seed: u64) -> Result<LinearRegression> {
    let (train, test) = dataset.split(test_size, seed)?;
    let model =
        LinearRegression::fit(Dataset::feature_names(), &train.features(), &train.targets())?
            .with_target_name(TARGET_NAME);
    info!(
        target_name = model.target_name.as_str(),
        features = ?model.feature_names,
        coefficients = ?model.coefficients,
        intercept = model.intercept,
        rank = model.rank,
        "fitted"
    );
    let train_rmse = evaluate(&model, &train)?;
    let test_rmse = evaluate(&model, &test)?;
    info!(train_rmse, test_rmse, n_train = train.len(), n_test = test.len());
    Ok(model)
}

fn evaluate(model: &LinearRegression, dataset: &Dataset) -> Result<f64> {
    let rmse = dataset
        .records
        .iter()
        .map(|record| Ok(record.savings - model.predict(&record.features())?))
        .collect::<Result<Rmse>>()?;
    Ok(rmse.value())
}
