use serde::{Deserialize, Serialize};
use shared::{errors::ServiceError, utils::field_errors};
use utoipa::ToSchema;
use validator::Validate;

fn default_first_purchase() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterCustomerRequest {
    #[validate(length(min = 2, max = 200, message = "Name must be 2 to 200 characters"))]
    #[schema(example = "Maria Souza")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maria@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123")]
    pub password: String,

    #[serde(default = "default_first_purchase")]
    pub first_purchase: bool,
}

/// Customer fields after validation, email normalised to lower case.
#[derive(Debug, Clone)]
pub struct NewCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub first_purchase: bool,
}

impl RegisterCustomerRequest {
    pub fn normalized(&self) -> Result<NewCustomerInput, ServiceError> {
        let req = RegisterCustomerRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            first_purchase: self.first_purchase,
        };

        req.validate()
            .map_err(|e| ServiceError::Validation(field_errors(&e)))?;

        Ok(NewCustomerInput {
            name: req.name,
            email: req.email,
            password: req.password,
            first_purchase: req.first_purchase,
        })
    }
}
