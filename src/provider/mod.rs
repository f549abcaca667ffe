//! The `Provider` capability set: database-backend-specific operations against
//! an admin connection. One implementor ships with this crate ([`postgres::PostgresProvider`]);
//! the trait exists so a future MySQL/SQLite backend can be added without touching
//! the lifecycle engine.

mod postgres;

pub use postgres::PostgresProvider;
pub(crate) use postgres::parse_for_migrations;

use crate::config::Config;
use crate::error::Result;

/// Database-specific operations against a privileged admin connection.
///
/// Implementors are shared across the engine and a `TestDatabase`'s teardown
/// path via `Arc<dyn Provider>`, so every method takes `&self` and relies on
/// interior mutability for the cached admin connection.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Resolve the admin DSN, parse it, and open the admin connection.
    async fn initialize(&self, config: &Config) -> Result<()>;

    /// `CREATE DATABASE "<name>"`.
    async fn create_database(&self, name: &str) -> Result<()>;

    /// Disallow new connections, then terminate existing backends. Must be
    /// called, in that order, before [`Provider::drop_database`].
    async fn terminate_connections(&self, name: &str) -> Result<()>;

    /// `DROP DATABASE IF EXISTS "<name>"`, retrying on SQLSTATE 55006.
    async fn drop_database(&self, name: &str) -> Result<()>;

    /// Build a per-database DSN from the cached admin fields.
    fn build_dsn(&self, dbname: &str) -> Result<String>;

    /// The resolved admin DSN, verbatim, for the migration runner.
    fn resolved_admin_dsn(&self) -> Option<String>;

    /// Close the admin connection, if open. Idempotent; safe before `initialize`.
    async fn cleanup(&self);

    /// Best-effort, synchronous teardown for use from `Drop`, where no async
    /// executor can be relied on to poll a detached task to completion. Opens
    /// its own connection distinct from the cached admin one; failures are
    /// logged, not returned, since there is no caller left to hand them to.
    /// The default implementation is a no-op.
    fn blocking_teardown(&self, _name: &str) {}
}

/// Quote a Postgres identifier: wrap in double quotes, doubling any embedded quote.
/// This is what lets an unsanitized `db_prefix` reach `CREATE`/`DROP DATABASE` safely.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
