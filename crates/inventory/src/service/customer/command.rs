use crate::{
    abstract_trait::customer::{
        repository::DynCustomerCommandRepository, service::CustomerCommandServiceTrait,
    },
    domain::{requests::RegisterCustomerRequest, response::CustomerResponse},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct CustomerCommandService {
    command: DynCustomerCommandRepository,
    hashing: DynHashing,
    tracer: OperationTracer,
}

pub struct CustomerCommandServiceDeps {
    pub command: DynCustomerCommandRepository,
    pub hashing: DynHashing,
    pub metrics: Metrics,
    pub registry: Arc<Mutex<Registry>>,
}

impl CustomerCommandService {
    pub async fn new(deps: CustomerCommandServiceDeps) -> Self {
        let CustomerCommandServiceDeps {
            command,
            hashing,
            metrics,
            registry,
        } = deps;

        metrics.register(
            &mut *registry.lock().await,
            "customer_command_service",
            "CustomerCommandService",
        );

        Self {
            command,
            hashing,
            tracer: OperationTracer::new("customer-command-service", metrics),
        }
    }
}

#[async_trait]
impl CustomerCommandServiceTrait for CustomerCommandService {
    async fn register_customer(
        &self,
        req: &RegisterCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "register_customer",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("operation", "register"),
            ],
        );

        let input = match req.normalized() {
            Ok(input) => input,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Invalid customer request");
                return Err(e);
            }
        };

        info!("🧑 Registering customer: {}", input.email);

        let password_hash = match self.hashing.hash_password(&input.password).await {
            Ok(hash) => hash,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to hash password");
                return Err(e);
            }
        };

        let customer = match self
            .command
            .create_customer(&input.name, &input.email, &password_hash, input.first_purchase)
            .await
        {
            Ok(customer) => customer,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to register customer");
                return Err(e.into());
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, method, "Customer registered successfully");

        Ok(ApiResponse::success(
            "Customer registered successfully",
            CustomerResponse::from(customer),
        ))
    }
}
