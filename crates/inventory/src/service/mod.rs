mod customer;
mod movement;
mod product;

pub use self::customer::{CustomerCommandService, CustomerCommandServiceDeps};
pub use self::movement::{
    MovementCommandService, MovementCommandServiceDeps, MovementQueryService,
    MovementQueryServiceDeps,
};
pub use self::product::{
    ProductCommandService, ProductCommandServiceDeps, ProductQueryService,
    ProductQueryServiceDeps,
};
