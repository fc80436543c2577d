use crate::{
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::Repositories,
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    config::{ConnectionPool, Hashing},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    /// Production state backed by Postgres. Starts the system metrics collector.
    pub async fn new(pool: ConnectionPool) -> Self {
        let state =
            Self::with_repositories(Repositories::postgres(pool), Arc::new(Hashing::new())).await;

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        state
    }

    pub async fn with_repositories(repositories: Repositories, hashing: DynHashing) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            repositories,
            hashing,
            registry: registry.clone(),
        })
        .await;

        system_metrics.register(&mut *registry.lock().await);

        Self {
            di_container,
            registry,
            system_metrics,
        }
    }
}
