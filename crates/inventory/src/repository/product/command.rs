use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    model::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product: {}", product.name);

        let sql = format!(
            r#"
            INSERT INTO products (
                name, price, cost_price, stock, initial_stock, min_stock,
                category_id, supplier_id, sku, brand, description, expires_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $4, $5, $6, $7, $8, $9, $10, $11,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.cost_price)
            .bind(product.stock)
            .bind(product.min_stock)
            .bind(product.category_id)
            .bind(product.supplier_id)
            .bind(&product.sku)
            .bind(&product.brand)
            .bind(&product.description)
            .bind(product.expires_at)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create product '{}': {e:?}", product.name);
                RepositoryError::from(e)
            })?;

        info!("✅ Product created with ID: {}", created.product_id);
        Ok(created)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError> {
        info!("🧨 Deleting product ID: {id}");

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
