use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{requests::CreateProductRequest, response::ProductResponse},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct ProductCommandService {
    command: DynProductCommandRepository,
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

pub struct ProductCommandServiceDeps {
    pub command: DynProductCommandRepository,
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
    pub registry: Arc<Mutex<Registry>>,
}

impl ProductCommandService {
    pub async fn new(deps: ProductCommandServiceDeps) -> Self {
        let ProductCommandServiceDeps {
            command,
            query,
            metrics,
            registry,
        } = deps;

        metrics.register(
            &mut *registry.lock().await,
            "product_command_service",
            "ProductCommandService",
        );

        Self {
            command,
            query,
            tracer: OperationTracer::new("product-command-service", metrics),
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
            ],
        );

        let new_product = match req.to_new_product() {
            Ok(product) => product,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Invalid product request");
                return Err(e);
            }
        };

        info!("🏗️ Creating product: {}", new_product.name);

        let product = match self.command.create_product(&new_product).await {
            Ok(product) => product,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to create product");
                return Err(e.into());
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, method, "Product created successfully");

        Ok(ApiResponse::success(
            "Product created successfully",
            ProductResponse::from(product),
        ))
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        info!("🧨 Deleting product ID: {id}");

        let not_found = ServiceError::NotFound {
            entity: "product",
            id,
        };

        match self.query.find_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                return Err(not_found);
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch product");
                return Err(e.into());
            }
        }

        match self.command.delete_product(id).await {
            Ok(true) => {}
            Ok(false) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                return Err(not_found);
            }
            // Movements reference the product; keep the history intact.
            Err(RepositoryError::ForeignKey(constraint)) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product has movements");
                return Err(RepositoryError::Conflict(format!(
                    "product {id} has recorded movements ({constraint})"
                ))
                .into());
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to delete product");
                return Err(e.into());
            }
        }

        self.tracer
            .complete_success(&tracing_ctx, method, "Product deleted successfully");

        Ok(ApiResponse::success("Product deleted successfully", ()))
    }
}
