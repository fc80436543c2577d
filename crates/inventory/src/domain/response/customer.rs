use crate::model::Customer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub first_purchase: bool,
    pub created_at: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(value: Customer) -> Self {
        CustomerResponse {
            id: value.customer_id,
            name: value.name,
            email: value.email,
            first_purchase: value.first_purchase,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
