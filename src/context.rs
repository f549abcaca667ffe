//! The `TestContext` trait stands in for the host test framework's logger,
//! non-fatal error sink, and fatal sink — the one piece of that framework's
//! interface the engine actually calls into.

use crate::error::Error;

pub trait TestContext: Send + Sync {
    fn log(&self, message: &str);
    fn error(&self, err: &Error);
    fn fatal(&self, err: &Error) -> !;
}

/// Default [`TestContext`]: logs through `tracing`, fails via `panic!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTestContext;

impl TestContext for TracingTestContext {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, err: &Error) {
        tracing::warn!("{err}");
    }

    fn fatal(&self, err: &Error) -> ! {
        panic!("{err}");
    }
}
