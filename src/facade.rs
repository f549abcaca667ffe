//! The Convenience Facade: binds the Lifecycle Engine to a [`TestContext`],
//! runs migrations against the freshly-created database, and turns any
//! failure along the way into a panic through `ctx.fatal`.

use std::sync::Arc;

use crate::config::Config;
use crate::context::TestContext;
use crate::engine::{Engine, TestDatabase};
use crate::initializer::{DieselPool, DieselPoolInitializer, DieselR2d2Pool, Initializer};
use crate::migrate;
use crate::provider::PostgresProvider;

/// The default handle returned by [`setup`]: derefs to the pool so call
/// sites read like a direct pool, while keeping the underlying
/// [`TestDatabase`] alive (and its teardown deferred) for as long as the
/// caller holds this value.
pub struct PgPool {
    pool: DieselR2d2Pool,
    db: TestDatabase,
}

impl std::ops::Deref for PgPool {
    type Target = DieselR2d2Pool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl PgPool {
    /// Tear the database down now, rather than leaving it to `Drop`'s
    /// synchronous-but-unconditional safety net. Idempotent; prefer this at
    /// the end of a test for deterministic ordering relative to other cleanup.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

/// Acquire a fresh database, run any configured migrations against it, and
/// return the default pool handle. Panics (through `ctx.fatal`) if any step
/// of acquisition or migration fails.
///
/// Not `#[track_caller]`: the panic happens inside this `async fn`'s body,
/// after an `.await` suspension point, so the attribute would not mark the
/// caller's frame — only wherever the executor happened to resume the poll.
/// `ctx.fatal`'s message identifies this entry point instead.
pub async fn setup(ctx: Arc<dyn TestContext>, config: Config) -> PgPool {
    let provider = Arc::new(PostgresProvider::new());
    let initializer: Arc<dyn Initializer> = Arc::new(DieselPoolInitializer);

    let db = match Engine::new(provider, Some(initializer), ctx.clone(), config).await {
        Ok(db) => db,
        Err(err) => ctx.fatal(&err),
    };

    run_migrations(&db, ctx.as_ref()).await;

    let pool = db
        .with_entity::<DieselPool, _, _>(|pool| pool.0.clone())
        .expect("setup always uses DieselPoolInitializer, whose entity downcasts to DieselPool");

    PgPool { pool, db }
}

/// Acquire a fresh database using a caller-supplied [`Initializer`], run any
/// configured migrations against it, and return the [`TestDatabase`] so the
/// caller can downcast `entity` to their own type. Panics (through
/// `ctx.fatal`) if any step of acquisition or migration fails.
///
/// Not `#[track_caller]`, for the same reason as [`setup`].
pub async fn setup_with_initializer(
    ctx: Arc<dyn TestContext>,
    config: Config,
    initializer: Arc<dyn Initializer>,
) -> TestDatabase {
    let provider = Arc::new(PostgresProvider::new());

    let db = match Engine::new(provider, Some(initializer), ctx.clone(), config).await {
        Ok(db) => db,
        Err(err) => ctx.fatal(&err),
    };

    run_migrations(&db, ctx.as_ref()).await;

    db
}

/// The `Created --[optional run_migrations]--> Ready` transition: run
/// whatever migration tool `db`'s config names, if any. On failure, tear the
/// database fully down before escalating through `ctx.fatal`.
async fn run_migrations(db: &TestDatabase, ctx: &dyn TestContext) {
    if let Err(err) = migrate::run(db.config(), db.provider(), db.dsn()).await {
        db.close().await;
        ctx.fatal(&err);
    }
    if db.config().verbose() && db.config().migration_tool().is_some() {
        ctx.log(&format!("migrations completed for {}", db.name()));
    }
}
