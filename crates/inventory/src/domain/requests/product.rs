use super::movement::MAX_UNIT_PRICE;
use crate::model::NewProduct;
use chrono::{NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::{
    errors::{FieldError, ServiceError},
    utils::field_errors,
};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn default_min_stock() -> i32 {
    5
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("range")
            .with_message("Price must be greater than zero".into()));
    }
    if *price > MAX_UNIT_PRICE {
        return Err(ValidationError::new("range").with_message("Price is too large".into()));
    }
    Ok(())
}

fn validate_cost_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("range")
            .with_message("Cost price cannot be negative".into()));
    }
    if *price > MAX_UNIT_PRICE {
        return Err(ValidationError::new("range").with_message("Cost price is too large".into()));
    }
    Ok(())
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    #[schema(example = "Arroz 5kg")]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "24.90")]
    pub price: Decimal,

    #[validate(custom(function = "validate_cost_price"))]
    #[schema(value_type = Option<String>, example = "18.00")]
    pub cost_price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 100)]
    pub stock: i32,

    #[serde(default = "default_min_stock")]
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    #[schema(example = 5)]
    pub min_stock: i32,

    #[validate(range(min = 1, message = "category_id must be a positive id"))]
    #[schema(example = 1)]
    pub category_id: i32,

    #[validate(range(min = 1, message = "supplier_id must be a positive id"))]
    pub supplier_id: Option<i32>,

    #[validate(length(max = 64, message = "SKU is too long"))]
    #[schema(example = "ARZ-5KG")]
    pub sku: Option<String>,

    #[validate(length(max = 100, message = "Brand is too long"))]
    pub brand: Option<String>,

    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2030-12-31")]
    pub expires_at: Option<NaiveDate>,
}

impl CreateProductRequest {
    pub fn to_new_product(&self) -> Result<NewProduct, ServiceError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };

        let name = self.name.trim();
        if name.is_empty() && !errors.iter().any(|e| e.field == "name") {
            errors.push(FieldError::new("name", "Name must be 1 to 200 characters"));
        }

        if let Some(expires_at) = self.expires_at {
            if expires_at < Utc::now().date_naive() {
                errors.push(FieldError::new(
                    "expires_at",
                    "Expiry date cannot be in the past",
                ));
            }
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        Ok(NewProduct {
            name: name.to_string(),
            price: self.price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            cost_price: self
                .cost_price
                .map(|p| p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
            stock: self.stock,
            min_stock: self.min_stock,
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            sku: trimmed(self.sku.as_deref()),
            brand: trimmed(self.brand.as_deref()),
            description: trimmed(self.description.as_deref()),
            expires_at: self.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProductRequest {
        CreateProductRequest {
            name: "  Feijão 1kg ".into(),
            price: Decimal::new(899, 2),
            cost_price: None,
            stock: 10,
            min_stock: 5,
            category_id: 1,
            supplier_id: None,
            sku: Some(" FJ-1 ".into()),
            brand: None,
            description: Some("".into()),
            expires_at: None,
        }
    }

    #[test]
    fn trims_text_fields() {
        let product = request().to_new_product().unwrap();

        assert_eq!(product.name, "Feijão 1kg");
        assert_eq!(product.sku.as_deref(), Some("FJ-1"));
        assert_eq!(product.description, None);
    }

    #[test]
    fn rejects_zero_price_and_negative_stock() {
        let req = CreateProductRequest {
            price: Decimal::ZERO,
            stock: -1,
            ..request()
        };

        let err = req.to_new_product().unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["price", "stock"]);
    }

    #[test]
    fn rejects_prices_beyond_the_column_range() {
        let req = CreateProductRequest {
            price: Decimal::MAX,
            cost_price: Some(MAX_UNIT_PRICE + Decimal::ONE),
            ..request()
        };

        let err = req.to_new_product().unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["cost_price", "price"]);
    }

    #[test]
    fn rounds_half_cents_away_from_zero() {
        let req = CreateProductRequest {
            price: Decimal::new(1005, 3),
            ..request()
        };

        assert_eq!(req.to_new_product().unwrap().price, Decimal::new(101, 2));
    }

    #[test]
    fn rejects_blank_name() {
        let req = CreateProductRequest {
            name: "   ".into(),
            ..request()
        };

        let err = req.to_new_product().unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["name"]);
    }

    #[test]
    fn rejects_past_expiry() {
        let req = CreateProductRequest {
            expires_at: NaiveDate::from_ymd_opt(2000, 1, 1),
            ..request()
        };

        let err = req.to_new_product().unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["expires_at"]);
    }

    #[test]
    fn min_stock_defaults_to_five() {
        let req: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Óleo",
            "price": "7.50",
            "stock": 3,
            "category_id": 1
        }))
        .unwrap();

        assert_eq!(req.min_stock, 5);
    }
}
