use crate::errors::repository::RepositoryError;
use bcrypt::BcryptError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Insufficient stock: current {current_stock}, requested {requested}")]
    InsufficientStock { current_stock: i32, requested: i32 },

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![FieldError::new(field, message)])
    }

    /// Field names carried by a validation failure, in report order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            ServiceError::Validation(errors) => {
                let mut fields: Vec<&str> = Vec::new();
                for error in errors {
                    if !fields.contains(&error.field.as_str()) {
                        fields.push(error.field.as_str());
                    }
                }
                fields
            }
            _ => Vec::new(),
        }
    }
}
