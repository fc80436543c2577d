mod customer;
mod movement;
mod product;

pub use self::customer::Customer;
pub use self::movement::{Movement, MovementDetail, MovementKind, MovementReportRow, NewMovement};
pub use self::product::{NewProduct, Product};
