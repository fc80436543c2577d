use crate::model::Customer as CustomerModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCustomerCommandRepository = Arc<dyn CustomerCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CustomerCommandRepositoryTrait {
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        first_purchase: bool,
    ) -> Result<CustomerModel, RepositoryError>;
}
