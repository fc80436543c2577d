use crate::{
    abstract_trait::customer::repository::CustomerCommandRepositoryTrait,
    model::Customer as CustomerModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CustomerCommandRepository {
    db: ConnectionPool,
}

impl CustomerCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerCommandRepositoryTrait for CustomerCommandRepository {
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        first_purchase: bool,
    ) -> Result<CustomerModel, RepositoryError> {
        info!("🆕 Registering customer: {email}");

        let customer = sqlx::query_as::<_, CustomerModel>(
            r#"
            INSERT INTO customers (name, email, password_hash, first_purchase, created_at)
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)
            RETURNING customer_id, name, email, password_hash, first_purchase, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(first_purchase)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to register customer {email}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("✅ Customer registered with ID: {}", customer.customer_id);
        Ok(customer)
    }
}
