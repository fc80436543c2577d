use crate::{
    abstract_trait::{
        movement::{repository::DynMovementQueryRepository, service::MovementQueryServiceTrait},
        product::repository::DynProductQueryRepository,
    },
    domain::{
        requests::{FindAllMovements, ProductReportQuery},
        response::{MovementResponse, ProductReportResponse},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct MovementQueryService {
    query: DynMovementQueryRepository,
    product_query: DynProductQueryRepository,
    tracer: OperationTracer,
}

pub struct MovementQueryServiceDeps {
    pub query: DynMovementQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub metrics: Metrics,
    pub registry: Arc<Mutex<Registry>>,
}

impl MovementQueryService {
    pub async fn new(deps: MovementQueryServiceDeps) -> Self {
        let MovementQueryServiceDeps {
            query,
            product_query,
            metrics,
            registry,
        } = deps;

        metrics.register(
            &mut *registry.lock().await,
            "movement_query_service",
            "MovementQueryService",
        );

        Self {
            query,
            product_query,
            tracer: OperationTracer::new("movement-query-service", metrics),
        }
    }
}

#[async_trait]
impl MovementQueryServiceTrait for MovementQueryService {
    async fn find_all(
        &self,
        req: &FindAllMovements,
    ) -> Result<ApiResponsePagination<Vec<MovementResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_all_movements",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let filter = match req.to_filter() {
            Ok(filter) => filter,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Invalid movement filter");
                return Err(e);
            }
        };

        info!(
            "🔍 Listing movements | page: {}, size: {}",
            filter.page, filter.page_size
        );

        let (rows, total) = match self.query.find_all(&filter).await {
            Ok(result) => result,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch movements");
                return Err(e.into());
            }
        };

        let data: Vec<MovementResponse> = rows.into_iter().map(MovementResponse::from).collect();

        self.tracer
            .complete_success(&tracing_ctx, method, "Movements retrieved successfully");

        Ok(ApiResponsePagination {
            status: "success".into(),
            message: "Movements retrieved successfully".into(),
            data,
            pagination: Pagination::new(filter.page, filter.page_size, total),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<MovementResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_movement_by_id",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("movement.id", id.to_string()),
            ],
        );

        let movement = match self.query.find_by_id(id).await {
            Ok(Some(movement)) => movement,
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Movement not found");
                return Err(ServiceError::NotFound {
                    entity: "movement",
                    id,
                });
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch movement");
                return Err(e.into());
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, method, "Movement retrieved successfully");

        Ok(ApiResponse::success(
            "Movement retrieved successfully",
            MovementResponse::from(movement),
        ))
    }

    async fn product_report(
        &self,
        req: &ProductReportQuery,
    ) -> Result<ApiResponse<ProductReportResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "product_movement_report",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "report"),
            ],
        );

        let product_id = match req.validated_product_id() {
            Ok(id) => id,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Invalid report request");
                return Err(e);
            }
        };

        let product = match self.product_query.find_by_id(product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                return Err(ServiceError::NotFound {
                    entity: "product",
                    id: product_id,
                });
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch product");
                return Err(e.into());
            }
        };

        let rows = match self
            .query
            .product_report(product_id, req.data_inicio, req.data_fim)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to build report");
                return Err(e.into());
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, method, "Report generated successfully");

        Ok(ApiResponse::success(
            "Report generated successfully",
            ProductReportResponse::new(product, req.data_inicio, req.data_fim, rows),
        ))
    }
}
