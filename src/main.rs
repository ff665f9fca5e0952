use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod artifact;
mod logging;
mod math;
mod opts;
mod prelude;
mod trainer;
mod web;

fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = logging::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    match opts.subcommand {
        Subcommand::Train(opts) => trainer::run(opts),
        Subcommand::Web(opts) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to build the runtime")?
            .block_on(web::run(opts)),
    }
}
