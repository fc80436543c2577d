use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub stock: i32,
    pub initial_stock: i32,
    pub min_stock: i32,
    pub category_id: i32,
    pub supplier_id: Option<i32>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<NaiveDate>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Insert payload; `stock` doubles as the product's initial stock.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub stock: i32,
    pub min_stock: i32,
    pub category_id: i32,
    pub supplier_id: Option<i32>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<NaiveDate>,
}
