use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises Sentry and installs the global subscriber.
///
/// Without a DSN Sentry stays disabled, while the log lines are still printed.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(sentry_event_filter)
        .with_filter(env_filter("SAVINGS_PREDICTOR_SENTRY_LOG", "savings_predictor=info")?);
    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(env_filter("SAVINGS_PREDICTOR_LOG", "savings_predictor=info,poem=info")?);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .init();

    Ok(guard)
}

fn env_filter(variable: &str, default: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_env(variable)
        .or_else(|_| EnvFilter::try_new(default))
        .with_context(|| format!("invalid log filter in `{}`", variable))
}

/// Errors become Sentry events, everything else only trails them as breadcrumbs.
fn sentry_event_filter(metadata: &Metadata) -> EventFilter {
    if metadata.level() == &Level::ERROR {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}
