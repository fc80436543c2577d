use crate::{
    abstract_trait::movement::repository::MovementCommandRepositoryTrait,
    model::{Movement as MovementModel, NewMovement},
    repository::unit_of_work::PgUnitOfWork,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tracing::{error, info};

#[async_trait]
impl MovementCommandRepositoryTrait for PgUnitOfWork {
    async fn insert_movement(
        &mut self,
        movement: &NewMovement,
    ) -> Result<MovementModel, RepositoryError> {
        let inserted = sqlx::query_as::<_, MovementModel>(
            r#"
            INSERT INTO movements (
                product_id, customer_id, quantity, kind, unit_price, total_value, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING movement_id, product_id, customer_id, quantity, kind,
                      unit_price, total_value, note, created_at
            "#,
        )
        .bind(movement.product_id)
        .bind(movement.customer_id)
        .bind(movement.quantity)
        .bind(movement.kind)
        .bind(movement.unit_price)
        .bind(movement.total_value)
        .bind(&movement.note)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to insert {} movement for product {}: {e:?}",
                movement.kind, movement.product_id
            );
            RepositoryError::from(e)
        })?;

        info!(
            "📝 Movement {} inserted ({} x{})",
            inserted.movement_id, inserted.kind, inserted.quantity
        );

        Ok(inserted)
    }
}
