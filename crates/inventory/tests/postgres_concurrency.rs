//! Runs against a real database: `DATABASE_URL=... cargo test -- --ignored`.
//! The database must be disposable; migrations are applied on start.

use chrono::Utc;
use inventory::{
    abstract_trait::{
        movement::service::MovementCommandServiceTrait,
        product::repository::ProductCommandRepositoryTrait,
    },
    domain::requests::CreateMovementRequest,
    model::NewProduct,
    repository::{PgUnitOfWorkFactory, ProductCommandRepository},
    service::{MovementCommandService, MovementCommandServiceDeps},
};
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    config::{ConnectionManager, ConnectionPool},
    errors::ServiceError,
    utils::Metrics,
};
use std::sync::Arc;
use tokio::sync::Mutex;

async fn pool() -> ConnectionPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = ConnectionManager::new_pool(&url, 1, 5).await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

async fn product_with_stock(pool: &ConnectionPool, stock: i32) -> i32 {
    let repo = ProductCommandRepository::new(pool.clone());
    let product = repo
        .create_product(&NewProduct {
            name: format!("concurrency-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default()),
            price: Decimal::new(100, 2),
            cost_price: None,
            stock,
            min_stock: 0,
            category_id: 1,
            supplier_id: None,
            sku: None,
            brand: None,
            description: None,
            expires_at: None,
        })
        .await
        .unwrap();
    product.product_id
}

async fn current_stock(pool: &ConnectionPool, product_id: i32) -> i32 {
    sqlx::query_scalar("SELECT stock FROM products WHERE product_id = $1")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "needs a scratch Postgres database in DATABASE_URL"]
async fn concurrent_exits_on_postgres_never_oversell() {
    let pool = pool().await;
    let product_id = product_with_stock(&pool, 10).await;

    let service = MovementCommandService::new(MovementCommandServiceDeps {
        unit_of_work: Arc::new(PgUnitOfWorkFactory::new(pool.clone())),
        metrics: Metrics::new(),
        registry: Arc::new(Mutex::new(Registry::default())),
    })
    .await;

    let exit = CreateMovementRequest {
        product_id: Some(product_id),
        quantity: Some(7),
        kind: Some("EXIT".into()),
        ..Default::default()
    };

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = service.clone();
            let exit = exit.clone();
            tokio::spawn(async move { service.create_movement(&exit).await })
        })
        .collect();

    let mut succeeded = 0;
    let mut insufficient = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(ServiceError::InsufficientStock { .. }) => insufficient += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(insufficient, 1);
    assert_eq!(current_stock(&pool, product_id).await, 3);

    let movements: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM movements WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(movements, 1);
}
