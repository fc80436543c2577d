use crate::model::Product as ProductModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;

/// Product access inside a unit of work.
#[async_trait]
pub trait ProductStockRepositoryTrait {
    async fn find_product(&mut self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;

    /// Adds `delta` to the stock unless the result would go below zero.
    /// Returns the number of rows changed; `0` means the floor was hit or
    /// the product is gone.
    async fn apply_stock_delta(&mut self, id: i32, delta: i32) -> Result<u64, RepositoryError>;
}
