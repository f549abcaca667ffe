//! Per-test isolated PostgreSQL databases for parallel test suites.
//!
//! Each call through [`setup`] (or [`setup_with_initializer`]) creates a
//! fresh physical database on an existing PostgreSQL server, builds a
//! connection handle for it, and guarantees the database is dropped when the
//! returned value goes out of scope — normally, on test failure, or on panic.
//!
//! ```no_run
//! # async fn run() {
//! use std::sync::Arc;
//! use pg_testdb::{Config, TracingTestContext};
//!
//! let ctx = Arc::new(TracingTestContext);
//! let config = Config::builder().db_prefix("myapp").build().unwrap();
//! let pool = pg_testdb::setup(ctx, config).await;
//! # }
//! ```
//!
//! Lower-level callers who want to drive the lifecycle directly (e.g. to
//! choose their own error-handling policy instead of panicking) can construct
//! a [`Provider`] and call [`Engine::new`] themselves.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod facade;
pub mod initializer;
pub mod log_format;
pub mod migrate;
pub mod name;
pub mod provider;
pub mod resolver;
pub mod telemetry;

pub use config::{Config, ConfigBuilder, MAX_PREFIX_LEN};
pub use context::{TestContext, TracingTestContext};
pub use engine::{Engine, TestDatabase};
pub use error::{Error, Result};
pub use facade::{PgPool, setup, setup_with_initializer};
pub use initializer::{DieselPool, DieselPoolInitializer, Entity, Initializer};
pub use migrate::MigrationTool;
pub use provider::{PostgresProvider, Provider};
pub use resolver::DEFAULT_ADMIN_DSN;
