mod customer;
mod movement;
mod product;
mod unit_of_work;

pub use self::customer::CustomerCommandRepository;
pub use self::movement::MovementQueryRepository;
pub use self::product::{ProductCommandRepository, ProductQueryRepository};
pub use self::unit_of_work::{PgUnitOfWork, PgUnitOfWorkFactory};

use crate::abstract_trait::{
    customer::repository::DynCustomerCommandRepository,
    movement::repository::DynMovementQueryRepository,
    product::repository::{DynProductCommandRepository, DynProductQueryRepository},
    unit_of_work::DynUnitOfWorkFactory,
};
use shared::config::ConnectionPool;
use std::sync::Arc;

/// Every repository the services depend on.
#[derive(Clone)]
pub struct Repositories {
    pub unit_of_work: DynUnitOfWorkFactory,
    pub product_command: DynProductCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub customer_command: DynCustomerCommandRepository,
    pub movement_query: DynMovementQueryRepository,
}

impl Repositories {
    pub fn postgres(db: ConnectionPool) -> Self {
        Self {
            unit_of_work: Arc::new(PgUnitOfWorkFactory::new(db.clone())),
            product_command: Arc::new(ProductCommandRepository::new(db.clone())),
            product_query: Arc::new(ProductQueryRepository::new(db.clone())),
            customer_command: Arc::new(CustomerCommandRepository::new(db.clone())),
            movement_query: Arc::new(MovementQueryRepository::new(db)),
        }
    }
}
