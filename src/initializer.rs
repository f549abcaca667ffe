//! The `Initializer` capability set: turn a per-database DSN into a
//! caller-chosen handle. The engine never inspects the result beyond its
//! optional "close" capability.

use std::any::Any;

use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;
use r2d2::Pool;

use crate::error::{Error, Result};

/// The opaque handle an [`Initializer`] produces. Implementors who want a
/// close step participate in teardown; everyone gets a checked downcast back
/// to their concrete type via [`Entity::as_any`]/[`Entity::as_any_mut`].
#[async_trait::async_trait]
pub trait Entity: Send + Sync {
    /// Release resources held by this entity, if it has any to release.
    /// The default does nothing — not every handle needs an explicit close
    /// (a raw DSN-only caller never produces an `Entity` at all).
    async fn close(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Turns a per-database DSN into a caller-chosen [`Entity`].
#[async_trait::async_trait]
pub trait Initializer: Send + Sync {
    async fn initialize(&self, dsn: &str) -> Result<Box<dyn Entity>>;
}

/// The crate's default handle type: an r2d2 pool of diesel [`PgConnection`]s.
pub(crate) type DieselR2d2Pool = Pool<ConnectionManager<PgConnection>>;

/// An r2d2-pooled diesel [`PgConnection`], wrapped so it can be handed back
/// through [`Entity::as_any`].
pub struct DieselPool(pub DieselR2d2Pool);

#[async_trait::async_trait]
impl Entity for DieselPool {
    // r2d2 has no async close; dropping the pool closes every connection in it.
    async fn close(&mut self) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The crate's default [`Initializer`]: builds a
/// `r2d2::Pool<diesel::r2d2::ConnectionManager<diesel::PgConnection>>`.
///
/// Pool construction is synchronous, so it runs on a blocking thread via
/// [`tokio::task::spawn_blocking`] to avoid stalling the async engine's call path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DieselPoolInitializer;

#[async_trait::async_trait]
impl Initializer for DieselPoolInitializer {
    async fn initialize(&self, dsn: &str) -> Result<Box<dyn Entity>> {
        let dsn = dsn.to_string();
        let pool = tokio::task::spawn_blocking(move || {
            let manager = ConnectionManager::<PgConnection>::new(dsn);
            r2d2::Pool::builder().build(manager)
        })
        .await
        .map_err(|join_err| Error::InitializerFailed(join_err.into()))?
        .map_err(|pool_err| Error::InitializerFailed(pool_err.into()))?;

        Ok(Box::new(DieselPool(pool)))
    }
}
