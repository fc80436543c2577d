use crate::model::Product;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub stock: i32,
    pub initial_stock: i32,
    pub min_stock: i32,
    pub below_min_stock: bool,
    pub category_id: i32,
    pub supplier_id: Option<i32>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<NaiveDate>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.product_id,
            below_min_stock: value.stock < value.min_stock,
            name: value.name,
            price: value.price,
            cost_price: value.cost_price,
            stock: value.stock,
            initial_stock: value.initial_stock,
            min_stock: value.min_stock,
            category_id: value.category_id,
            supplier_id: value.supplier_id,
            sku: value.sku,
            brand: value.brand,
            description: value.description,
            expires_at: value.expires_at,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
