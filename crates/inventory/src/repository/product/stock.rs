use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductStockRepositoryTrait,
    model::Product as ProductModel, repository::unit_of_work::PgUnitOfWork,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tracing::{error, info};

#[async_trait]
impl ProductStockRepositoryTrait for PgUnitOfWork {
    async fn find_product(&mut self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to load product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn apply_stock_delta(&mut self, id: i32, delta: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE product_id = $1
              AND stock + $2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to apply stock delta {delta} to product {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!(
            "📦 Stock delta {delta} on product {id} touched {} row(s)",
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }
}
