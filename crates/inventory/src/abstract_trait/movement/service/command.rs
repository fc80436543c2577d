use crate::domain::{
    requests::{CreateMovementRequest, MovementCommand, SaleRequest, StockEntryRequest},
    response::MovementSummaryResponse,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynMovementCommandService = Arc<dyn MovementCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait MovementCommandServiceTrait {
    /// Records an already validated movement atomically.
    async fn record_movement(
        &self,
        command: MovementCommand,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError>;
    async fn create_movement(
        &self,
        req: &CreateMovementRequest,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError>;
    async fn stock_entry(
        &self,
        req: &StockEntryRequest,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError>;
    async fn sale(
        &self,
        req: &SaleRequest,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError>;
}
