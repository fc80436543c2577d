use crate::{
    domain::requests::MovementFilter,
    model::{MovementDetail, MovementReportRow},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynMovementQueryRepository = Arc<dyn MovementQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait MovementQueryRepositoryTrait {
    async fn find_all(
        &self,
        filter: &MovementFilter,
    ) -> Result<(Vec<MovementDetail>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<MovementDetail>, RepositoryError>;
    /// One row per movement kind present for the product in the period.
    async fn product_report(
        &self,
        product_id: i32,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<MovementReportRow>, RepositoryError>;
}
