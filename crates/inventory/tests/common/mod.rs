#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use inventory::{
    abstract_trait::{
        customer::repository::{CustomerCommandRepositoryTrait, CustomerLookupRepositoryTrait},
        movement::repository::{MovementCommandRepositoryTrait, MovementQueryRepositoryTrait},
        product::repository::{
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
            ProductStockRepositoryTrait,
        },
        unit_of_work::{DynUnitOfWork, UnitOfWorkFactoryTrait, UnitOfWorkTrait},
    },
    domain::requests::MovementFilter,
    model::{
        Customer, Movement, MovementDetail, MovementKind, MovementReportRow, NewMovement,
        NewProduct, Product,
    },
    repository::Repositories,
    service::{MovementCommandService, MovementCommandServiceDeps},
    state::AppState,
};
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    abstract_trait::HashingTrait,
    errors::{RepositoryError, ServiceError},
    utils::Metrics,
};
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub products: BTreeMap<i32, Product>,
    pub customers: BTreeMap<i32, Customer>,
    pub movements: Vec<Movement>,
}

impl Store {
    fn next_product_id(&self) -> i32 {
        self.products.keys().max().copied().unwrap_or(0) + 1
    }

    fn next_customer_id(&self) -> i32 {
        self.customers.keys().max().copied().unwrap_or(0) + 1
    }

    fn detail(&self, movement: &Movement) -> MovementDetail {
        let product = self.products.get(&movement.product_id);
        let customer = movement
            .customer_id
            .and_then(|id| self.customers.get(&id));

        MovementDetail {
            movement_id: movement.movement_id,
            product_id: movement.product_id,
            product_name: product.map(|p| p.name.clone()),
            product_sku: product.and_then(|p| p.sku.clone()),
            customer_id: movement.customer_id,
            customer_name: customer.map(|c| c.name.clone()),
            quantity: movement.quantity,
            kind: movement.kind,
            unit_price: movement.unit_price,
            total_value: movement.total_value,
            note: movement.note.clone(),
            created_at: movement.created_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct Counters {
    pub begins: AtomicUsize,
    pub commits: AtomicUsize,
    pub rollbacks: AtomicUsize,
    pub repository_calls: AtomicUsize,
}

/// In-memory stand-in for Postgres. Transactions are serialised: `begin`
/// takes the store lock and holds it until commit, rollback or drop.
#[derive(Clone, Default)]
pub struct InMemoryDb {
    store: Arc<Mutex<Store>>,
    counters: Arc<Counters>,
    stock_drift: Arc<std::sync::Mutex<Option<i32>>>,
    vanish_after_update: Arc<AtomicBool>,
    movement_seq: Arc<AtomicUsize>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        let db = Arc::new(self.clone());
        Repositories {
            unit_of_work: db.clone(),
            product_command: db.clone(),
            product_query: db.clone(),
            customer_command: db.clone(),
            movement_query: db,
        }
    }

    pub async fn seed_product(&self, name: &str, stock: i32) -> i32 {
        let mut store = self.store.lock().await;
        let id = store.next_product_id();
        store.products.insert(
            id,
            Product {
                product_id: id,
                name: name.to_string(),
                price: Decimal::new(1000, 2),
                cost_price: None,
                stock,
                initial_stock: stock,
                min_stock: 5,
                category_id: 1,
                supplier_id: None,
                sku: None,
                brand: None,
                description: None,
                expires_at: None,
                created_at: Some(now()),
                updated_at: Some(now()),
            },
        );
        id
    }

    pub async fn seed_customer(&self, name: &str) -> i32 {
        let mut store = self.store.lock().await;
        let id = store.next_customer_id();
        store.customers.insert(
            id,
            Customer {
                customer_id: id,
                name: name.to_string(),
                email: format!("customer{id}@example.com"),
                password_hash: "hashed".into(),
                first_purchase: true,
                created_at: Some(now()),
            },
        );
        id
    }

    pub async fn product(&self, id: i32) -> Option<Product> {
        self.store.lock().await.products.get(&id).cloned()
    }

    pub async fn movements(&self) -> Vec<Movement> {
        self.store.lock().await.movements.clone()
    }

    /// Makes the next stock update see `stock` as the committed value, as if
    /// another transaction had committed between the read and the write.
    pub fn drift_stock_before_update(&self, stock: i32) {
        if let Ok(mut drift) = self.stock_drift.lock() {
            *drift = Some(stock);
        }
    }

    /// Next successful stock update also removes the product inside the
    /// transaction, so the follow-up read finds nothing.
    pub fn drop_product_after_update(&self) {
        self.vanish_after_update.store(true, Ordering::SeqCst);
    }

    pub fn begins(&self) -> usize {
        self.counters.begins.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.counters.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.counters.rollbacks.load(Ordering::SeqCst)
    }

    pub fn repository_calls(&self) -> usize {
        self.counters.repository_calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.counters.repository_calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<Store>,
    working: Store,
    db: InMemoryDb,
}

impl InMemoryUnitOfWork {
    fn touch(&self) {
        self.db.touch();
    }
}

#[async_trait]
impl UnitOfWorkFactoryTrait for InMemoryDb {
    async fn begin(&self) -> Result<DynUnitOfWork, RepositoryError> {
        self.counters.begins.fetch_add(1, Ordering::SeqCst);
        let guard = self.store.clone().lock_owned().await;
        let working = guard.clone();

        Ok(Box::new(InMemoryUnitOfWork {
            guard,
            working,
            db: self.clone(),
        }))
    }
}

#[async_trait]
impl UnitOfWorkTrait for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let InMemoryUnitOfWork {
            mut guard,
            working,
            db,
        } = *self;
        *guard = working;
        db.counters.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.db.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ProductStockRepositoryTrait for InMemoryUnitOfWork {
    async fn find_product(&mut self, id: i32) -> Result<Option<Product>, RepositoryError> {
        self.touch();
        Ok(self.working.products.get(&id).cloned())
    }

    async fn apply_stock_delta(&mut self, id: i32, delta: i32) -> Result<u64, RepositoryError> {
        self.touch();

        let drift = self
            .db
            .stock_drift
            .lock()
            .ok()
            .and_then(|mut drift| drift.take());

        let Some(product) = self.working.products.get_mut(&id) else {
            return Ok(0);
        };

        if let Some(stock) = drift {
            product.stock = stock;
        }

        if product.stock + delta < 0 {
            return Ok(0);
        }

        product.stock += delta;
        product.updated_at = Some(now());

        if self.db.vanish_after_update.swap(false, Ordering::SeqCst) {
            self.working.products.remove(&id);
        }
        Ok(1)
    }
}

#[async_trait]
impl CustomerLookupRepositoryTrait for InMemoryUnitOfWork {
    async fn find_customer(&mut self, id: i32) -> Result<Option<Customer>, RepositoryError> {
        self.touch();
        Ok(self.working.customers.get(&id).cloned())
    }
}

#[async_trait]
impl MovementCommandRepositoryTrait for InMemoryUnitOfWork {
    async fn insert_movement(&mut self, movement: &NewMovement) -> Result<Movement, RepositoryError> {
        self.touch();

        if !self.working.products.contains_key(&movement.product_id) {
            return Err(RepositoryError::ForeignKey(
                "movements_product_id_fkey".into(),
            ));
        }
        if let Some(customer_id) = movement.customer_id {
            if !self.working.customers.contains_key(&customer_id) {
                return Err(RepositoryError::ForeignKey(
                    "movements_customer_id_fkey".into(),
                ));
            }
        }

        let movement_id = self.db.movement_seq.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        let inserted = Movement {
            movement_id,
            product_id: movement.product_id,
            customer_id: movement.customer_id,
            quantity: movement.quantity,
            kind: movement.kind,
            unit_price: movement.unit_price,
            total_value: movement.total_value,
            note: movement.note.clone(),
            created_at: now(),
        };
        self.working.movements.push(inserted.clone());
        Ok(inserted)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryDb {
    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        self.touch();
        let mut store = self.store.lock().await;

        if product.category_id != 1 {
            return Err(RepositoryError::ForeignKey(
                "products_category_id_fkey".into(),
            ));
        }
        if product.sku.is_some()
            && store.products.values().any(|p| p.sku == product.sku)
        {
            return Err(RepositoryError::AlreadyExists("products_sku_key".into()));
        }

        let id = store.next_product_id();
        let created = Product {
            product_id: id,
            name: product.name.clone(),
            price: product.price,
            cost_price: product.cost_price,
            stock: product.stock,
            initial_stock: product.stock,
            min_stock: product.min_stock,
            category_id: product.category_id,
            supplier_id: product.supplier_id,
            sku: product.sku.clone(),
            brand: product.brand.clone(),
            description: product.description.clone(),
            expires_at: product.expires_at,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        store.products.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError> {
        self.touch();
        let mut store = self.store.lock().await;

        if store.movements.iter().any(|m| m.product_id == id) {
            return Err(RepositoryError::ForeignKey(
                "movements_product_id_fkey".into(),
            ));
        }

        Ok(store.products.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryDb {
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        self.touch();
        Ok(self.store.lock().await.products.get(&id).cloned())
    }
}

#[async_trait]
impl CustomerCommandRepositoryTrait for InMemoryDb {
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        first_purchase: bool,
    ) -> Result<Customer, RepositoryError> {
        self.touch();
        let mut store = self.store.lock().await;

        if store
            .customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(email))
        {
            return Err(RepositoryError::AlreadyExists("customers_email_key".into()));
        }

        let id = store.next_customer_id();
        let customer = Customer {
            customer_id: id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_purchase,
            created_at: Some(now()),
        };
        store.customers.insert(id, customer.clone());
        Ok(customer)
    }
}

#[async_trait]
impl MovementQueryRepositoryTrait for InMemoryDb {
    async fn find_all(
        &self,
        filter: &MovementFilter,
    ) -> Result<(Vec<MovementDetail>, i64), RepositoryError> {
        self.touch();
        let store = self.store.lock().await;

        let mut matching: Vec<&Movement> = store
            .movements
            .iter()
            .filter(|m| filter.kind.is_none_or(|kind| m.kind == kind))
            .filter(|m| filter.product_id.is_none_or(|id| m.product_id == id))
            .filter(|m| filter.from.is_none_or(|from| m.created_at.date() >= from))
            .filter(|m| filter.to.is_none_or(|to| m.created_at.date() <= to))
            .collect();

        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.movement_id.cmp(&a.movement_id))
        });

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.page_size as usize)
            .map(|m| store.detail(m))
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MovementDetail>, RepositoryError> {
        self.touch();
        let store = self.store.lock().await;
        Ok(store
            .movements
            .iter()
            .find(|m| m.movement_id == id)
            .map(|m| store.detail(m)))
    }

    async fn product_report(
        &self,
        product_id: i32,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
    ) -> Result<Vec<MovementReportRow>, RepositoryError> {
        self.touch();
        let store = self.store.lock().await;

        let rows = [MovementKind::Entry, MovementKind::Exit]
            .into_iter()
            .filter_map(|kind| {
                let movements: Vec<&Movement> = store
                    .movements
                    .iter()
                    .filter(|m| m.product_id == product_id && m.kind == kind)
                    .filter(|m| from.is_none_or(|from| m.created_at.date() >= from))
                    .filter(|m| to.is_none_or(|to| m.created_at.date() <= to))
                    .collect();

                if movements.is_empty() {
                    return None;
                }

                let prices: Vec<Decimal> = movements.iter().filter_map(|m| m.unit_price).collect();
                let totals: Vec<Decimal> = movements.iter().filter_map(|m| m.total_value).collect();

                Some(MovementReportRow {
                    kind,
                    total_movements: movements.len() as i64,
                    total_quantity: movements.iter().map(|m| m.quantity as i64).sum(),
                    average_unit_price: (!prices.is_empty()).then(|| {
                        (prices.iter().sum::<Decimal>() / Decimal::from(prices.len())).round_dp(2)
                    }),
                    total_value: (!totals.is_empty()).then(|| totals.iter().sum()),
                    unpriced_movements: movements.iter().filter(|m| m.total_value.is_none()).count()
                        as i64,
                })
            })
            .collect();

        Ok(rows)
    }
}

pub struct FakeHashing;

#[async_trait]
impl HashingTrait for FakeHashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        Ok(format!("hashed:{password}"))
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<bool, ServiceError> {
        Ok(hashed_password == format!("hashed:{password}"))
    }
}

pub async fn movement_service(db: &InMemoryDb) -> MovementCommandService {
    MovementCommandService::new(MovementCommandServiceDeps {
        unit_of_work: Arc::new(db.clone()),
        metrics: Metrics::new(),
        registry: Arc::new(Mutex::new(Registry::default())),
    })
    .await
}

pub async fn app_state(db: &InMemoryDb) -> AppState {
    AppState::with_repositories(db.repositories(), Arc::new(FakeHashing)).await
}
