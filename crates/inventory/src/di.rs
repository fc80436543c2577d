use crate::{
    abstract_trait::{
        customer::service::DynCustomerCommandService,
        movement::service::{DynMovementCommandService, DynMovementQueryService},
        product::service::{DynProductCommandService, DynProductQueryService},
    },
    repository::Repositories,
    service::{
        CustomerCommandService, CustomerCommandServiceDeps, MovementCommandService,
        MovementCommandServiceDeps, MovementQueryService, MovementQueryServiceDeps,
        ProductCommandService, ProductCommandServiceDeps, ProductQueryService,
        ProductQueryServiceDeps,
    },
};
use prometheus_client::registry::Registry;
use shared::{abstract_trait::DynHashing, utils::Metrics};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub movement_command: DynMovementCommandService,
    pub movement_query: DynMovementQueryService,
    pub product_command: DynProductCommandService,
    pub product_query: DynProductQueryService,
    pub customer_command: DynCustomerCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("movement_command", &"MovementCommandService")
            .field("movement_query", &"MovementQueryService")
            .field("product_command", &"ProductCommandService")
            .field("product_query", &"ProductQueryService")
            .field("customer_command", &"CustomerCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hashing: DynHashing,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hashing,
            registry,
        } = deps;

        let movement_command: DynMovementCommandService = Arc::new(
            MovementCommandService::new(MovementCommandServiceDeps {
                unit_of_work: repositories.unit_of_work.clone(),
                metrics: Metrics::new(),
                registry: registry.clone(),
            })
            .await,
        );

        let movement_query: DynMovementQueryService = Arc::new(
            MovementQueryService::new(MovementQueryServiceDeps {
                query: repositories.movement_query.clone(),
                product_query: repositories.product_query.clone(),
                metrics: Metrics::new(),
                registry: registry.clone(),
            })
            .await,
        );

        let product_command: DynProductCommandService = Arc::new(
            ProductCommandService::new(ProductCommandServiceDeps {
                command: repositories.product_command.clone(),
                query: repositories.product_query.clone(),
                metrics: Metrics::new(),
                registry: registry.clone(),
            })
            .await,
        );

        let product_query: DynProductQueryService = Arc::new(
            ProductQueryService::new(ProductQueryServiceDeps {
                query: repositories.product_query.clone(),
                metrics: Metrics::new(),
                registry: registry.clone(),
            })
            .await,
        );

        let customer_command: DynCustomerCommandService = Arc::new(
            CustomerCommandService::new(CustomerCommandServiceDeps {
                command: repositories.customer_command.clone(),
                hashing,
                metrics: Metrics::new(),
                registry,
            })
            .await,
        );

        Self {
            movement_command,
            movement_query,
            product_command,
            product_query,
            customer_command,
        }
    }
}
