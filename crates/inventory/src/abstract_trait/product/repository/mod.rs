mod command;
mod query;
mod stock;

pub use self::command::{DynProductCommandRepository, ProductCommandRepositoryTrait};
pub use self::query::{DynProductQueryRepository, ProductQueryRepositoryTrait};
pub use self::stock::ProductStockRepositoryTrait;
