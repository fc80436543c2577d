mod customer;
mod movement;
mod product;

pub use self::customer::{NewCustomerInput, RegisterCustomerRequest};
pub use self::movement::{
    CreateMovementRequest, FindAllMovements, MAX_TOTAL_VALUE, MAX_UNIT_PRICE, MovementCommand,
    MovementFilter, ProductReportQuery, SaleRequest, StockEntryRequest,
};
pub use self::product::CreateProductRequest;
