use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {id}");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }
}
