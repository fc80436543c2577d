use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Direction of a stock movement. Stored as the `movement_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    Entry,
    Exit,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "ENTRY",
            MovementKind::Exit => "EXIT",
        }
    }

    /// Stock delta this movement applies for `quantity` units.
    pub fn signed(&self, quantity: i32) -> i32 {
        match self {
            MovementKind::Entry => quantity,
            MovementKind::Exit => -quantity,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ENTRY" => Ok(MovementKind::Entry),
            "EXIT" => Ok(MovementKind::Exit),
            other => Err(format!("kind must be ENTRY or EXIT, got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movement {
    pub movement_id: i32,
    pub product_id: i32,
    pub customer_id: Option<i32>,
    pub quantity: i32,
    pub kind: MovementKind,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub product_id: i32,
    pub customer_id: Option<i32>,
    pub quantity: i32,
    pub kind: MovementKind,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub note: Option<String>,
}

/// Movement row joined with the names of what it references.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovementDetail {
    pub movement_id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub quantity: i32,
    pub kind: MovementKind,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Per-kind aggregate for one product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovementReportRow {
    pub kind: MovementKind,
    pub total_movements: i64,
    pub total_quantity: i64,
    pub average_unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub unpriced_movements: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_the_two_kinds() {
        assert_eq!("ENTRY".parse::<MovementKind>(), Ok(MovementKind::Entry));
        assert_eq!("EXIT".parse::<MovementKind>(), Ok(MovementKind::Exit));
        assert!("INVALID".parse::<MovementKind>().is_err());
        assert!("entry".parse::<MovementKind>().is_err());
        assert!("ENTRADA".parse::<MovementKind>().is_err());
    }

    #[test]
    fn exit_delta_is_negative() {
        assert_eq!(MovementKind::Entry.signed(5), 5);
        assert_eq!(MovementKind::Exit.signed(5), -5);
    }
}
