//! The Lifecycle Engine: composes Name Minter, Provider and Initializer into
//! one "acquire test database" operation, with compensating rollback on any
//! step after the database exists. Migrations run outside this engine, from
//! the facade layer, after `Engine::new` hands back a `TestDatabase` (the
//! `Created --[optional run_migrations]--> Ready` transition).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::context::TestContext;
use crate::error::Result;
use crate::initializer::{Entity, Initializer};
use crate::name;
use crate::provider::Provider;

/// Composes the components into `Engine::new`; carries no state of its own.
pub struct Engine;

impl Engine {
    /// Run the full acquisition pipeline: validate, initialize the provider,
    /// mint a name, create the database, build its DSN, and run the
    /// initializer (if supplied). Any failure past `create_database` tears
    /// the partially-built database back down before returning the error.
    pub async fn new(
        provider: Arc<dyn Provider>,
        initializer: Option<Arc<dyn Initializer>>,
        ctx: Arc<dyn TestContext>,
        config: Config,
    ) -> Result<TestDatabase> {
        config.validate()?;

        provider.initialize(&config).await?;

        let name = name::mint(config.db_prefix())?;

        provider.create_database(&name).await?;
        if config.verbose() {
            ctx.log(&format!("creating database {name}"));
        }

        let dsn = match provider.build_dsn(&name) {
            Ok(dsn) => dsn,
            Err(err) => {
                let _ = provider.drop_database(&name).await;
                return Err(err);
            }
        };

        let entity = match &initializer {
            Some(init) => match init.initialize(&dsn).await {
                Ok(entity) => Some(entity),
                Err(err) => {
                    full_rollback(provider.as_ref(), &name, ctx.as_ref()).await;
                    return Err(err);
                }
            },
            None => None,
        };

        Ok(TestDatabase {
            name,
            dsn,
            config,
            entity: std::sync::Mutex::new(entity),
            provider,
            closed: AtomicBool::new(false),
            logger: ctx,
        })
    }
}

/// Terminate connections, drop the database, and close the admin connection,
/// logging (rather than propagating) any secondary failure.
async fn full_rollback(provider: &dyn Provider, name: &str, ctx: &dyn TestContext) {
    if let Err(err) = provider.terminate_connections(name).await {
        ctx.error(&err);
    }
    if let Err(err) = provider.drop_database(name).await {
        ctx.error(&err);
    }
    provider.cleanup().await;
}

/// The lifecycle handle returned by [`Engine::new`]. Teardown runs exactly
/// once, whether driven by an explicit [`TestDatabase::close`] or by [`Drop`].
pub struct TestDatabase {
    name: String,
    dsn: String,
    config: Config,
    entity: std::sync::Mutex<Option<Box<dyn Entity>>>,
    provider: Arc<dyn Provider>,
    closed: AtomicBool,
    logger: Arc<dyn TestContext>,
}

impl TestDatabase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The provider backing this database, for the facade's post-`Engine::new`
    /// migration step.
    pub(crate) fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Downcast the entity produced by the initializer, if any, to `T` and run `f` on it.
    pub fn with_entity<T, F, R>(&self, f: F) -> Option<R>
    where
        T: 'static,
        F: FnOnce(&T) -> R,
    {
        let guard = self.entity.lock().unwrap();
        let entity = guard.as_ref()?;
        let typed: &T = entity.as_any().downcast_ref()?;
        Some(f(typed))
    }

    /// Tear the database down: close the entity if present, disallow new
    /// connections, terminate stragglers, drop the database, close the admin
    /// connection. Idempotent — later calls (including the one from [`Drop`]) are no-ops.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.teardown().await;
    }

    /// Alias for [`TestDatabase::close`], named to match the data model's
    /// "close()/close_async()" framing for callers coming from a sync context.
    pub async fn close_async(&self) {
        self.close().await;
    }

    async fn teardown(&self) {
        if let Some(mut entity) = self.entity.lock().unwrap().take() {
            entity.close().await;
        }

        if self.config.verbose() {
            self.logger.log(&format!("cleaning up database {}", self.name));
        }

        if let Err(err) = self.provider.terminate_connections(&self.name).await {
            self.logger.error(&err);
        }
        if let Err(err) = self.provider.drop_database(&self.name).await {
            self.logger.error(&err);
        } else if self.config.verbose() {
            self.logger.log(&format!("dropped database {}", self.name));
        }
        self.provider.cleanup().await;
    }
}

impl Drop for TestDatabase {
    /// The panic/forgetfulness safety net. A caller that already
    /// `.close().await`ed never reaches here (the swap below returns early).
    ///
    /// `Drop` cannot be `async`, and a detached `tokio::spawn` is not a
    /// reliable substitute: under a current-thread runtime (the default for
    /// `#[tokio::test]`), the runtime can shut down, cancelling the spawned
    /// task, before it is ever polled. So this runs the drop synchronously,
    /// the same way the entity's async `close` cannot run from here either —
    /// the entity is dropped without that call; callers that need it to run
    /// should `close().await` explicitly instead of relying on `Drop`.
    fn drop(&mut self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.entity.get_mut().take();
        if self.config.verbose() {
            self.logger.log(&format!("cleaning up database {}", self.name));
        }
        self.provider.blocking_teardown(&self.name);
    }
}
