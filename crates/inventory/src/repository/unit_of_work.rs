use crate::abstract_trait::unit_of_work::{
    DynUnitOfWork, UnitOfWorkFactoryTrait, UnitOfWorkTrait,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

/// Unit of work over a single Postgres transaction.
///
/// If it is dropped without `commit`, sqlx rolls the transaction back.
pub struct PgUnitOfWork {
    pub(crate) tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWorkTrait for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit transaction: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.rollback().await.map_err(|e| {
            error!("❌ Failed to roll back transaction: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[derive(Clone)]
pub struct PgUnitOfWorkFactory {
    db: ConnectionPool,
}

impl PgUnitOfWorkFactory {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWorkFactoryTrait for PgUnitOfWorkFactory {
    async fn begin(&self) -> Result<DynUnitOfWork, RepositoryError> {
        let tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to open transaction: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🔓 Transaction opened");

        Ok(Box::new(PgUnitOfWork { tx }))
    }
}
