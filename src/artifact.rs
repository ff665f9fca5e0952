//! Pickled model artifact.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_pickle::{DeOptions, SerOptions};

use crate::prelude::*;
use crate::trainer::regression::LinearRegression;

#[instrument(skip(model))]
pub fn save(model: &LinearRegression, path: &Path) -> Result {
    let file = File::create(path)
        .with_context(|| format!("failed to create the artifact `{}`", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_pickle::to_writer(&mut writer, model, SerOptions::new())
        .context("failed to serialize the model")?;
    writer.flush().context("failed to flush the artifact")?;
    Ok(())
}

#[instrument]
pub fn load(path: &Path) -> Result<LinearRegression> {
    let file = File::open(path)
        .with_context(|| format!("failed to open the artifact `{}`", path.display()))?;
    let model: LinearRegression = serde_pickle::from_reader(BufReader::new(file), DeOptions::new())
        .with_context(|| format!("failed to deserialize the artifact `{}`", path.display()))?;
    model.validate().context("the artifact is invalid")?;
    info!(features = ?model.feature_names, n_samples = model.n_samples, "loaded");
    Ok(model)
}
