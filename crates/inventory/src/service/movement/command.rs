use crate::{
    abstract_trait::{
        customer::repository::CustomerLookupRepositoryTrait,
        movement::{repository::MovementCommandRepositoryTrait, service::MovementCommandServiceTrait},
        product::repository::ProductStockRepositoryTrait,
        unit_of_work::{DynUnitOfWorkFactory, UnitOfWorkTrait},
    },
    domain::{
        requests::{CreateMovementRequest, MovementCommand, SaleRequest, StockEntryRequest},
        response::MovementSummaryResponse,
    },
    model::{MovementKind, NewMovement},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct MovementCommandService {
    unit_of_work: DynUnitOfWorkFactory,
    tracer: OperationTracer,
}

pub struct MovementCommandServiceDeps {
    pub unit_of_work: DynUnitOfWorkFactory,
    pub metrics: Metrics,
    pub registry: Arc<Mutex<Registry>>,
}

impl MovementCommandService {
    pub async fn new(deps: MovementCommandServiceDeps) -> Self {
        let MovementCommandServiceDeps {
            unit_of_work,
            metrics,
            registry,
        } = deps;

        metrics.register(
            &mut *registry.lock().await,
            "movement_command_service",
            "MovementCommandService",
        );

        Self {
            unit_of_work,
            tracer: OperationTracer::new("movement-command-service", metrics),
        }
    }

    fn reject(&self, operation: &str, err: ServiceError) -> ServiceError {
        warn!("⚠️ Rejected {operation}: {err}");
        let ctx = self.tracer.start(
            operation,
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", operation.to_string()),
            ],
        );
        self.tracer
            .complete_error(&ctx, Method::Post, "Invalid movement request");
        err
    }

    /// Steps that run inside the transaction. Any error leaves the caller
    /// responsible for rolling back.
    async fn apply(
        uow: &mut dyn UnitOfWorkTrait,
        command: &MovementCommand,
    ) -> Result<MovementSummaryResponse, ServiceError> {
        let product = uow
            .find_product(command.product_id)
            .await?
            .ok_or(ServiceError::NotFound {
                entity: "product",
                id: command.product_id,
            })?;

        let customer = match command.customer_id {
            Some(customer_id) => Some(uow.find_customer(customer_id).await?.ok_or(
                ServiceError::NotFound {
                    entity: "customer",
                    id: customer_id,
                },
            )?),
            None => None,
        };

        let insufficient = ServiceError::InsufficientStock {
            current_stock: product.stock,
            requested: command.quantity,
        };

        if command.kind == MovementKind::Exit && command.quantity > product.stock {
            return Err(insufficient);
        }

        let movement = uow
            .insert_movement(&NewMovement {
                product_id: command.product_id,
                customer_id: command.customer_id,
                quantity: command.quantity,
                kind: command.kind,
                unit_price: command.unit_price,
                total_value: command.total_value()?,
                note: command.note.clone(),
            })
            .await?;

        let delta = command.kind.signed(command.quantity);
        if uow.apply_stock_delta(command.product_id, delta).await? == 0 {
            warn!(
                "🏁 Stock of product {} changed concurrently, {} x{} no longer fits",
                command.product_id, command.kind, command.quantity
            );
            return Err(insufficient);
        }

        let stock_after = uow
            .find_product(command.product_id)
            .await?
            .map(|p| p.stock)
            .ok_or(ServiceError::NotFound {
                entity: "product",
                id: command.product_id,
            })?;

        Ok(MovementSummaryResponse::new(
            movement,
            &product,
            customer.as_ref(),
            stock_after,
        ))
    }
}

#[async_trait]
impl MovementCommandServiceTrait for MovementCommandService {
    async fn record_movement(
        &self,
        command: MovementCommand,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError> {
        info!(
            "🏗️ Recording {} of {} unit(s) for product {}",
            command.kind, command.quantity, command.product_id
        );

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "record_movement",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "record"),
                KeyValue::new("movement.kind", command.kind.as_str()),
                KeyValue::new("movement.product_id", command.product_id.to_string()),
                KeyValue::new("movement.quantity", command.quantity.to_string()),
            ],
        );

        if let Err(e) = command.total_value() {
            self.tracer.complete_error(&tracing_ctx, method, &e.to_string());
            return Err(e);
        }

        let mut uow = match self.unit_of_work.begin().await {
            Ok(uow) => uow,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to open transaction");
                return Err(e.into());
            }
        };

        let summary = match Self::apply(uow.as_mut(), &command).await {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(rollback_err) = uow.rollback().await {
                    error!("❌ Rollback failed: {rollback_err:?}");
                }
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = uow.commit().await {
            self.tracer
                .complete_error(&tracing_ctx, method, "Failed to commit movement");
            return Err(e.into());
        }

        let message = match summary.kind {
            MovementKind::Entry => "Stock entry recorded successfully",
            MovementKind::Exit => "Stock exit recorded successfully",
        };

        self.tracer.complete_success(&tracing_ctx, method, message);

        Ok(ApiResponse::success(message, summary))
    }

    async fn create_movement(
        &self,
        req: &CreateMovementRequest,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError> {
        let command = req
            .to_command()
            .map_err(|e| self.reject("create_movement", e))?;

        self.record_movement(command).await
    }

    async fn stock_entry(
        &self,
        req: &StockEntryRequest,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError> {
        let command = req
            .to_command()
            .map_err(|e| self.reject("stock_entry", e))?;

        self.record_movement(command).await
    }

    async fn sale(
        &self,
        req: &SaleRequest,
    ) -> Result<ApiResponse<MovementSummaryResponse>, ServiceError> {
        let command = req.to_command().map_err(|e| self.reject("sale", e))?;

        self.record_movement(command).await
    }
}
