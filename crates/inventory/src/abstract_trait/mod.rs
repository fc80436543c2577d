pub mod customer;
pub mod movement;
pub mod product;
pub mod unit_of_work;
