use crate::{
    abstract_trait::customer::repository::CustomerLookupRepositoryTrait,
    model::Customer as CustomerModel, repository::unit_of_work::PgUnitOfWork,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tracing::error;

#[async_trait]
impl CustomerLookupRepositoryTrait for PgUnitOfWork {
    async fn find_customer(&mut self, id: i32) -> Result<Option<CustomerModel>, RepositoryError> {
        sqlx::query_as::<_, CustomerModel>(
            r#"
            SELECT customer_id, name, email, password_hash, first_purchase, created_at
            FROM customers
            WHERE customer_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to load customer {id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
