use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::ProductResponse,
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

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

pub struct ProductQueryServiceDeps {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
    pub registry: Arc<Mutex<Registry>>,
}

impl ProductQueryService {
    pub async fn new(deps: ProductQueryServiceDeps) -> Self {
        let ProductQueryServiceDeps {
            query,
            metrics,
            registry,
        } = deps;

        metrics.register(
            &mut *registry.lock().await,
            "product_query_service",
            "ProductQueryService",
        );

        Self {
            query,
            tracer: OperationTracer::new("product-query-service", metrics),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_product_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = match self.query.find_by_id(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                return Err(ServiceError::NotFound {
                    entity: "product",
                    id,
                });
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch product");
                return Err(e.into());
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, method, "Product retrieved successfully");

        Ok(ApiResponse::success(
            "Product retrieved successfully",
            ProductResponse::from(product),
        ))
    }
}
