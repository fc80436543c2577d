mod command;
mod query;
mod stock;

pub use self::command::ProductCommandRepository;
pub use self::query::ProductQueryRepository;

pub(crate) const PRODUCT_COLUMNS: &str = "product_id, name, price, cost_price, stock, \
     initial_stock, min_stock, category_id, supplier_id, sku, brand, description, \
     expires_at, created_at, updated_at";
