use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{post, Endpoint, EndpointExt, Route, Server};

use crate::artifact;
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::trainer::regression::LinearRegression;
use crate::web::middleware::ErrorMiddleware;

mod middleware;
mod predict;
mod rejection;

pub async fn run(opts: WebOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "web"));

    let host = parse_host(&opts.host)?;
    let model = Arc::new(artifact::load(&opts.model)?);
    let listener = TcpListener::bind((host, opts.port));
    info!(host = opts.host.as_str(), port = opts.port, "listening…");
    Server::new(listener)
        .run(create_app(model))
        .await
        .context("the web server has failed")?;
    Ok(())
}

fn parse_host(host: &str) -> Result<IpAddr> {
    IpAddr::from_str(host).with_context(|| format!("invalid host `{}`", host))
}

/// The model is loaded once and only read afterwards, so it is shared without a lock.
pub fn create_app(model: Arc<LinearRegression>) -> impl Endpoint {
    Route::new()
        .at("/predict", post(predict::predict))
        .data(model)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
}
