use crate::model::Customer as CustomerModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;

/// Customer access inside a unit of work.
#[async_trait]
pub trait CustomerLookupRepositoryTrait {
    async fn find_customer(&mut self, id: i32) -> Result<Option<CustomerModel>, RepositoryError>;
}
