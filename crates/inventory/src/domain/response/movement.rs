use crate::model::{Customer, Movement, MovementDetail, MovementKind, MovementReportRow, Product};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a committed stock movement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MovementSummaryResponse {
    pub movement_id: i32,
    pub kind: MovementKind,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub note: Option<String>,
    /// Product stock after this movement.
    pub stock_after: i32,
    pub created_at: String,
}

impl MovementSummaryResponse {
    pub fn new(
        movement: Movement,
        product: &Product,
        customer: Option<&Customer>,
        stock_after: i32,
    ) -> Self {
        Self {
            movement_id: movement.movement_id,
            kind: movement.kind,
            product_id: movement.product_id,
            product_name: product.name.clone(),
            quantity: movement.quantity,
            customer_id: movement.customer_id,
            customer_name: customer.map(|c| c.name.clone()),
            unit_price: movement.unit_price,
            total_value: movement.total_value,
            note: movement.note,
            stock_after,
            created_at: movement.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovementResponse {
    pub id: i32,
    pub kind: MovementKind,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<MovementDetail> for MovementResponse {
    fn from(value: MovementDetail) -> Self {
        MovementResponse {
            id: value.movement_id,
            kind: value.kind,
            product_id: value.product_id,
            product_name: value.product_name,
            product_sku: value.product_sku,
            customer_id: value.customer_id,
            customer_name: value.customer_name,
            quantity: value.quantity,
            unit_price: value.unit_price,
            total_value: value.total_value,
            note: value.note,
            created_at: value.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovementTotalsResponse {
    pub kind: MovementKind,
    pub total_movements: i64,
    pub total_quantity: i64,
    pub average_unit_price: Option<Decimal>,
    /// Sum over priced movements only.
    pub total_value: Option<Decimal>,
    pub unpriced_movements: i64,
}

impl From<MovementReportRow> for MovementTotalsResponse {
    fn from(value: MovementReportRow) -> Self {
        MovementTotalsResponse {
            kind: value.kind,
            total_movements: value.total_movements,
            total_quantity: value.total_quantity,
            average_unit_price: value.average_unit_price,
            total_value: value.total_value,
            unpriced_movements: value.unpriced_movements,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductReportResponse {
    pub product_id: i32,
    pub product_name: String,
    pub current_stock: i32,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub totals: Vec<MovementTotalsResponse>,
}

impl ProductReportResponse {
    pub fn new(
        product: Product,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        rows: Vec<MovementReportRow>,
    ) -> Self {
        Self {
            product_id: product.product_id,
            product_name: product.name,
            current_stock: product.stock,
            from,
            to,
            totals: rows.into_iter().map(MovementTotalsResponse::from).collect(),
        }
    }
}
