//! Optional convenience for host applications that want to initialize a
//! `tracing` subscriber the same way this crate's own tests do.
//!
//! The library itself never calls this: installing a global subscriber is
//! global, process-wide state, and that remains the host's decision.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::log_format::TargetFirstFormat;

/// Install a global `tracing` subscriber using [`TargetFirstFormat`] and an
/// `EnvFilter` read from `RUST_LOG` (defaulting to `info`).
pub fn init_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = Layer::default().event_format(TargetFirstFormat);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
