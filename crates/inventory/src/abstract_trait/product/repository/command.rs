use crate::model::{NewProduct, Product as ProductModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError>;
    /// Returns `false` when no product had that id.
    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError>;
}
