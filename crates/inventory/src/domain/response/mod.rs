mod customer;
mod movement;
mod product;

pub use self::customer::CustomerResponse;
pub use self::movement::{
    MovementResponse, MovementSummaryResponse, MovementTotalsResponse, ProductReportResponse,
};
pub use self::product::ProductResponse;
