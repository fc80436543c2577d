use crate::domain::{
    requests::{FindAllMovements, ProductReportQuery},
    response::{MovementResponse, ProductReportResponse},
};
use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynMovementQueryService = Arc<dyn MovementQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait MovementQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllMovements,
    ) -> Result<ApiResponsePagination<Vec<MovementResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<MovementResponse>, ServiceError>;
    async fn product_report(
        &self,
        req: &ProductReportQuery,
    ) -> Result<ApiResponse<ProductReportResponse>, ServiceError>;
}
