use crate::abstract_trait::{
    customer::repository::CustomerLookupRepositoryTrait,
    movement::repository::MovementCommandRepositoryTrait,
    product::repository::ProductStockRepositoryTrait,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUnitOfWork = Box<dyn UnitOfWorkTrait>;
pub type DynUnitOfWorkFactory = Arc<dyn UnitOfWorkFactoryTrait + Send + Sync>;

/// Repositories bound to one open transaction.
///
/// Nothing written through a unit of work is visible to others until
/// [`commit`](UnitOfWorkTrait::commit). Dropping it without committing
/// discards the work.
#[async_trait]
pub trait UnitOfWorkTrait:
    ProductStockRepositoryTrait
    + CustomerLookupRepositoryTrait
    + MovementCommandRepositoryTrait
    + Send
{
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait UnitOfWorkFactoryTrait {
    async fn begin(&self) -> Result<DynUnitOfWork, RepositoryError>;
}
