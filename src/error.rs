//! The engine's error taxonomy.
//!
//! Every variant that wraps an external cause carries it via `#[source]` so
//! that `{}`/`{:#}` printing (and `anyhow`'s chain rendering at the
//! harness boundary) surfaces the original SQLSTATE or subprocess output.

use crate::migrate::MigrationTool;

/// The error type returned by every fallible operation in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config sets a migration directory but no migration tool")]
    MigrationDirWithoutTool,

    #[error("config sets a migration tool but no migration directory")]
    MigrationToolWithoutDir,

    #[error("db_prefix is {len} characters long, must be 34 or fewer")]
    PrefixTooLong { len: usize },

    #[error("could not parse admin DSN: {0}")]
    BadAdminDsn(#[source] url::ParseError),

    #[error("admin DSN is missing required connection fields: {0}")]
    IncompleteAdminDsn(&'static str),

    #[error("could not reach admin database: {0}")]
    AdminUnreachable(#[source] tokio_postgres::Error),

    #[error("CREATE DATABASE {name:?} was rejected: {source}")]
    CreateRejected {
        name: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("failed to terminate connections to {name:?}: {source}")]
    TerminateFailed {
        name: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("DROP DATABASE {name:?} failed after {attempts} attempt(s): {source}")]
    DropFailed {
        name: String,
        attempts: u32,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("could not build a per-database DSN: {0}")]
    BuildDsnFailed(&'static str),

    #[error("{tool} migrations failed (exit {status}): {output}")]
    MigrationFailed {
        tool: MigrationTool,
        status: i32,
        output: String,
    },

    #[error("failed to launch {tool} ({path}): {source}")]
    MigrationToolLaunchFailed {
        tool: MigrationTool,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized database driver in DSN scheme {0:?}")]
    UnknownDriver(String),

    #[error("failed to write temporary migration config: {0}")]
    TempFileFailed(#[source] std::io::Error),

    #[error("failed to resolve migration directory to an absolute path: {0}")]
    PathResolutionFailed(#[source] std::io::Error),

    #[error("initializer failed: {0}")]
    InitializerFailed(#[source] anyhow::Error),

    #[error("the system random source refused to yield bytes: {0}")]
    RandomSourceUnavailable(#[source] getrandom::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
