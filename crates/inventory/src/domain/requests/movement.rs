use crate::model::MovementKind;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    errors::{FieldError, ServiceError},
    utils::field_errors,
};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

fn validate_kind(kind: &str) -> Result<(), ValidationError> {
    kind.parse::<MovementKind>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("kind").with_message("kind must be ENTRY or EXIT".into()))
}

/// Largest value a `NUMERIC(12, 2)` unit price column holds.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Largest value a `NUMERIC(14, 2)` total column holds.
pub const MAX_TOTAL_VALUE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("range")
            .with_message("unit_price must not be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("scale")
            .with_message("unit_price must have at most 2 decimal places".into()));
    }
    if *price > MAX_UNIT_PRICE {
        return Err(ValidationError::new("range")
            .with_message("unit_price is too large".into()));
    }
    Ok(())
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Typed movement intent. Only built from a request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementCommand {
    pub kind: MovementKind,
    pub product_id: i32,
    pub customer_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub note: Option<String>,
}

impl MovementCommand {
    /// `quantity × unit_price`; absent when no unit price was supplied.
    pub fn total_value(&self) -> Result<Option<Decimal>, ServiceError> {
        let Some(price) = self.unit_price else {
            return Ok(None);
        };

        if price.normalize().scale() > 2 {
            return Err(ServiceError::validation(
                "unit_price",
                "unit_price must have at most 2 decimal places",
            ));
        }

        match Decimal::from(self.quantity).checked_mul(price) {
            Some(total) if total <= MAX_TOTAL_VALUE => Ok(Some(total.round_dp(2))),
            _ => Err(ServiceError::validation(
                "unit_price",
                "quantity x unit_price exceeds the maximum total value",
            )),
        }
    }

    fn checked(self) -> Result<Self, ServiceError> {
        self.total_value()?;
        Ok(self)
    }
}

fn reject_if_any(errors: Vec<FieldError>) -> Result<(), ServiceError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

fn collect_errors<T: Validate>(req: &T) -> Vec<FieldError> {
    match req.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => field_errors(&errors),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMovementRequest {
    #[validate(
        required(message = "product_id is required"),
        range(min = 1, message = "product_id must be a positive id")
    )]
    #[schema(example = 1)]
    pub product_id: Option<i32>,

    #[validate(range(min = 1, message = "customer_id must be a positive id"))]
    #[schema(example = 1)]
    pub customer_id: Option<i32>,

    #[validate(
        required(message = "quantity is required"),
        range(min = 1, message = "quantity must be greater than zero")
    )]
    #[schema(example = 5)]
    pub quantity: Option<i32>,

    #[validate(
        required(message = "kind is required"),
        custom(function = "validate_kind")
    )]
    #[schema(example = "ENTRY")]
    pub kind: Option<String>,

    #[validate(custom(function = "validate_unit_price"))]
    #[schema(value_type = Option<String>, example = "2.00")]
    pub unit_price: Option<Decimal>,

    #[validate(length(max = 1000, message = "note is too long"))]
    pub note: Option<String>,

    /// Marks the movement as a sale; a customer becomes mandatory.
    #[serde(default)]
    pub sale: bool,
}

impl CreateMovementRequest {
    pub fn to_command(&self) -> Result<MovementCommand, ServiceError> {
        let mut errors = collect_errors(self);

        if self.sale && self.customer_id.is_none() {
            errors.push(FieldError::new(
                "customer_id",
                "customer_id is required for sales",
            ));
        }

        reject_if_any(errors)?;

        let (Some(product_id), Some(quantity), Some(kind)) =
            (self.product_id, self.quantity, self.kind.as_deref())
        else {
            return Err(ServiceError::Internal(
                "validated movement request is missing fields".into(),
            ));
        };

        let kind = kind
            .parse::<MovementKind>()
            .map_err(|msg| ServiceError::validation("kind", msg))?;

        MovementCommand {
            kind,
            product_id,
            customer_id: self.customer_id,
            quantity,
            unit_price: self.unit_price,
            note: normalize_note(self.note.as_deref()),
        }
        .checked()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct StockEntryRequest {
    #[validate(
        required(message = "product_id is required"),
        range(min = 1, message = "product_id must be a positive id")
    )]
    #[schema(example = 1)]
    pub product_id: Option<i32>,

    #[validate(
        required(message = "quantity is required"),
        range(min = 1, message = "quantity must be greater than zero")
    )]
    #[schema(example = 10)]
    pub quantity: Option<i32>,

    #[validate(custom(function = "validate_unit_price"))]
    #[schema(value_type = Option<String>, example = "4.50")]
    pub unit_price: Option<Decimal>,

    #[validate(length(max = 1000, message = "note is too long"))]
    pub note: Option<String>,
}

impl StockEntryRequest {
    pub fn to_command(&self) -> Result<MovementCommand, ServiceError> {
        reject_if_any(collect_errors(self))?;

        let (Some(product_id), Some(quantity)) = (self.product_id, self.quantity) else {
            return Err(ServiceError::Internal(
                "validated entry request is missing fields".into(),
            ));
        };

        MovementCommand {
            kind: MovementKind::Entry,
            product_id,
            customer_id: None,
            quantity,
            unit_price: self.unit_price,
            note: normalize_note(self.note.as_deref()),
        }
        .checked()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaleRequest {
    #[validate(
        required(message = "product_id is required"),
        range(min = 1, message = "product_id must be a positive id")
    )]
    #[schema(example = 1)]
    pub product_id: Option<i32>,

    #[validate(
        required(message = "customer_id is required for sales"),
        range(min = 1, message = "customer_id must be a positive id")
    )]
    #[schema(example = 1)]
    pub customer_id: Option<i32>,

    #[validate(
        required(message = "quantity is required"),
        range(min = 1, message = "quantity must be greater than zero")
    )]
    #[schema(example = 2)]
    pub quantity: Option<i32>,

    #[validate(custom(function = "validate_unit_price"))]
    #[schema(value_type = Option<String>, example = "9.90")]
    pub unit_price: Option<Decimal>,

    #[validate(length(max = 1000, message = "note is too long"))]
    pub note: Option<String>,
}

impl SaleRequest {
    pub fn to_command(&self) -> Result<MovementCommand, ServiceError> {
        reject_if_any(collect_errors(self))?;

        let (Some(product_id), Some(customer_id), Some(quantity)) =
            (self.product_id, self.customer_id, self.quantity)
        else {
            return Err(ServiceError::Internal(
                "validated sale request is missing fields".into(),
            ));
        };

        MovementCommand {
            kind: MovementKind::Exit,
            product_id,
            customer_id: Some(customer_id),
            quantity,
            unit_price: self.unit_price,
            note: normalize_note(self.note.as_deref()),
        }
        .checked()
    }
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllMovements {
    #[validate(custom(function = "validate_kind"))]
    pub tipo: Option<String>,

    #[serde(rename = "produtoId")]
    #[validate(range(min = 1, message = "produtoId must be a positive id"))]
    pub produto_id: Option<i32>,

    #[serde(rename = "dataInicio")]
    pub data_inicio: Option<NaiveDate>,

    #[serde(rename = "dataFim")]
    pub data_fim: Option<NaiveDate>,

    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "pagina must be at least 1"))]
    pub pagina: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "limite must be between 1 and 100"))]
    pub limite: i32,
}

impl Default for FindAllMovements {
    fn default() -> Self {
        Self {
            tipo: None,
            produto_id: None,
            data_inicio: None,
            data_fim: None,
            pagina: default_page(),
            limite: default_page_size(),
        }
    }
}

/// Validated listing filter.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementFilter {
    pub kind: Option<MovementKind>,
    pub product_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: i32,
    pub page_size: i32,
}

impl MovementFilter {
    pub fn offset(&self) -> i64 {
        ((self.page - 1).max(0) as i64) * self.page_size as i64
    }
}

fn check_period(from: Option<NaiveDate>, to: Option<NaiveDate>, errors: &mut Vec<FieldError>) {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            errors.push(FieldError::new(
                "dataFim",
                "dataFim must not be before dataInicio",
            ));
        }
    }
}

impl FindAllMovements {
    pub fn to_filter(&self) -> Result<MovementFilter, ServiceError> {
        let mut errors = collect_errors(self);
        check_period(self.data_inicio, self.data_fim, &mut errors);
        reject_if_any(errors)?;

        let kind = self
            .tipo
            .as_deref()
            .map(str::parse::<MovementKind>)
            .transpose()
            .map_err(|msg| ServiceError::validation("tipo", msg))?;

        Ok(MovementFilter {
            kind,
            product_id: self.produto_id,
            from: self.data_inicio,
            to: self.data_fim,
            page: self.pagina,
            page_size: self.limite,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductReportQuery {
    #[serde(rename = "produtoId")]
    #[validate(
        required(message = "produtoId is required"),
        range(min = 1, message = "produtoId must be a positive id")
    )]
    pub produto_id: Option<i32>,

    #[serde(rename = "dataInicio")]
    pub data_inicio: Option<NaiveDate>,

    #[serde(rename = "dataFim")]
    pub data_fim: Option<NaiveDate>,
}

impl ProductReportQuery {
    pub fn validated_product_id(&self) -> Result<i32, ServiceError> {
        let mut errors = collect_errors(self);
        check_period(self.data_inicio, self.data_fim, &mut errors);
        reject_if_any(errors)?;

        self.produto_id
            .ok_or_else(|| ServiceError::validation("produtoId", "produtoId is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quantity: i32, price: Option<Decimal>) -> CreateMovementRequest {
        CreateMovementRequest {
            product_id: Some(1),
            quantity: Some(quantity),
            kind: Some("ENTRY".into()),
            unit_price: price,
            ..Default::default()
        }
    }

    fn fields(err: ServiceError) -> Vec<String> {
        err.invalid_fields().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = CreateMovementRequest::default().to_command().unwrap_err();

        assert_eq!(fields(err), vec!["kind", "product_id", "quantity"]);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = entry(0, None).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["quantity"]);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = entry(-3, None).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["quantity"]);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let req = CreateMovementRequest {
            kind: Some("INVALID".into()),
            ..entry(1, None)
        };

        let err = req.to_command().unwrap_err();
        assert_eq!(fields(err), vec!["kind"]);
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let err = entry(1, Some(Decimal::new(-1, 2))).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["unit_price"]);
    }

    #[test]
    fn sale_flag_requires_customer() {
        let req = CreateMovementRequest {
            kind: Some("EXIT".into()),
            sale: true,
            ..entry(1, None)
        };

        let err = req.to_command().unwrap_err();
        assert_eq!(fields(err), vec!["customer_id"]);
    }

    #[test]
    fn sale_request_requires_customer() {
        let req = SaleRequest {
            product_id: Some(1),
            quantity: Some(1),
            ..Default::default()
        };

        let err = req.to_command().unwrap_err();
        assert_eq!(fields(err), vec!["customer_id"]);
    }

    #[test]
    fn sale_request_is_an_exit() {
        let req = SaleRequest {
            product_id: Some(4),
            customer_id: Some(9),
            quantity: Some(2),
            unit_price: Some(Decimal::new(990, 2)),
            note: Some("   ".into()),
        };

        let command = req.to_command().unwrap();

        assert_eq!(command.kind, MovementKind::Exit);
        assert_eq!(command.customer_id, Some(9));
        assert_eq!(command.note, None);
        assert_eq!(command.total_value().unwrap(), Some(Decimal::new(1980, 2)));
    }

    #[test]
    fn entry_request_ignores_customer() {
        let req = StockEntryRequest {
            product_id: Some(1),
            quantity: Some(5),
            unit_price: None,
            note: Some("  reposição  ".into()),
        };

        let command = req.to_command().unwrap();

        assert_eq!(command.kind, MovementKind::Entry);
        assert_eq!(command.customer_id, None);
        assert_eq!(command.note.as_deref(), Some("reposição"));
        assert_eq!(command.total_value().unwrap(), None);
    }

    #[test]
    fn total_value_is_quantity_times_price() {
        let command = entry(5, Some(Decimal::new(200, 2))).to_command().unwrap();
        assert_eq!(command.total_value().unwrap(), Some(Decimal::new(1000, 2)));
    }

    #[test]
    fn zero_price_still_yields_a_total() {
        let command = entry(3, Some(Decimal::ZERO)).to_command().unwrap();
        assert_eq!(command.total_value().unwrap(), Some(Decimal::ZERO));
    }

    #[test]
    fn price_bounds_match_the_columns() {
        assert_eq!(MAX_UNIT_PRICE, Decimal::new(999_999_999_999, 2));
        assert_eq!(MAX_TOTAL_VALUE, Decimal::new(99_999_999_999_999, 2));
    }

    #[test]
    fn huge_unit_price_is_rejected() {
        let err = entry(1000, Some(Decimal::MAX)).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["unit_price"]);

        let just_over = MAX_UNIT_PRICE + Decimal::new(1, 2);
        let err = entry(1, Some(just_over)).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["unit_price"]);
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let err = entry(1000, Some(MAX_UNIT_PRICE)).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["unit_price"]);

        let command = MovementCommand {
            kind: MovementKind::Entry,
            product_id: 1,
            customer_id: None,
            quantity: i32::MAX,
            unit_price: Some(Decimal::MAX),
            note: None,
        };
        assert_eq!(fields(command.total_value().unwrap_err()), vec!["unit_price"]);
    }

    #[test]
    fn largest_storable_total_is_accepted() {
        let command = entry(100, Some(MAX_UNIT_PRICE)).to_command().unwrap();
        assert_eq!(
            command.total_value().unwrap(),
            Some(Decimal::new(99_999_999_999_900, 2))
        );
    }

    #[test]
    fn sub_cent_unit_price_is_rejected() {
        let err = entry(1, Some(Decimal::new(5, 3))).to_command().unwrap_err();
        assert_eq!(fields(err), vec!["unit_price"]);
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        let command = entry(2, Some(Decimal::new(15000, 4))).to_command().unwrap();
        assert_eq!(command.total_value().unwrap(), Some(Decimal::new(300, 2)));
    }

    #[test]
    fn listing_rejects_inverted_period() {
        let query = FindAllMovements {
            data_inicio: NaiveDate::from_ymd_opt(2025, 3, 10),
            data_fim: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        };

        let err = query.to_filter().unwrap_err();
        assert_eq!(fields(err), vec!["dataFim"]);
    }

    #[test]
    fn listing_caps_page_size() {
        let query = FindAllMovements {
            limite: 500,
            ..Default::default()
        };

        let err = query.to_filter().unwrap_err();
        assert_eq!(fields(err), vec!["limite"]);
    }

    #[test]
    fn listing_offset_follows_page() {
        let filter = FindAllMovements {
            tipo: Some("EXIT".into()),
            pagina: 3,
            limite: 10,
            ..Default::default()
        }
        .to_filter()
        .unwrap();

        assert_eq!(filter.kind, Some(MovementKind::Exit));
        assert_eq!(filter.offset(), 20);
    }
}
