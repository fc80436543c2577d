use crate::model::{Movement as MovementModel, NewMovement};
use async_trait::async_trait;
use shared::errors::RepositoryError;

/// Movement writer inside a unit of work.
#[async_trait]
pub trait MovementCommandRepositoryTrait {
    async fn insert_movement(
        &mut self,
        movement: &NewMovement,
    ) -> Result<MovementModel, RepositoryError>;
}
