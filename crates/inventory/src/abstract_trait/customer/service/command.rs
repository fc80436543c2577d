use crate::domain::{requests::RegisterCustomerRequest, response::CustomerResponse};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynCustomerCommandService = Arc<dyn CustomerCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CustomerCommandServiceTrait {
    async fn register_customer(
        &self,
        req: &RegisterCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
}
